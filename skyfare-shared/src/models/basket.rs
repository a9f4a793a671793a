use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Baggage option chosen at booking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Baggage {
    Hand,
    Full,
}

/// A persisted booking draft awaiting payment. Created once, deleted
/// individually, never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketItem {
    pub id: String,
    pub uid: String,
    pub flight_number: String,
    pub airline: String,
    pub origin_city: String,
    pub destination_city: String,
    pub departure_at: DateTime<Utc>,
    pub passengers: u32,
    pub baggage: Baggage,
    pub total_price: f64,
    pub booked_by: String,
}

/// Booking payload posted to the basket collection; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketDraft {
    pub uid: String,
    pub flight_number: String,
    pub airline: String,
    pub origin_city: String,
    pub destination_city: String,
    pub departure_at: DateTime<Utc>,
    pub passengers: u32,
    pub baggage: Baggage,
    pub total_price: f64,
    pub booked_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baggage_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&Baggage::Hand).unwrap(), "\"hand\"");
        assert_eq!(serde_json::to_string(&Baggage::Full).unwrap(), "\"full\"");
        let parsed: Baggage = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(parsed, Baggage::Full);
    }
}
