use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A flight listing from the hosted catalog. Read-only reference data; never
/// mutated client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub flight_number: String,
    pub origin_city: String,
    pub origin_airport: String,
    pub destination_city: String,
    pub destination_airport: String,
    pub departure_at: DateTime<Utc>,
    pub airline: String,
    pub price: f64,
    pub currency: String,
}

/// A promoted destination from the special_offers collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialOffer {
    pub id: String,
    pub destination_city: String,
    pub destination_airport: String,
    pub departure_at: DateTime<Utc>,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}
