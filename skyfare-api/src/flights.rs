use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use skyfare_core::pricing;
use skyfare_shared::models::{Baggage, BasketDraft, BasketItem, Ticket};
use tracing::info;

use crate::error::AppError;
use crate::middleware::auth::SessionClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/flight/{id}", get(flight_detail))
}

/// Routes that require a signed-in session; wrapped with the auth middleware
/// in `app`.
pub fn booking_routes() -> Router<AppState> {
    Router::new().route("/flight/{id}/book", post(book_flight))
}

#[derive(Debug, Serialize)]
struct FlightScreen {
    ticket: Ticket,
    baggage_fee: f64,
    passenger_limit: u32,
}

async fn flight_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FlightScreen>, AppError> {
    let ticket = state
        .catalog
        .get_ticket(&id)
        .await
        .map_err(AppError::from_store)?;

    Ok(Json(FlightScreen {
        ticket,
        baggage_fee: pricing::BAGGAGE_FEE,
        passenger_limit: pricing::PASSENGER_LIMIT,
    }))
}

#[derive(Debug, Deserialize)]
struct BookRequest {
    passengers: u32,
    baggage: Baggage,
}

async fn book_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<SessionClaims>,
    Json(req): Json<BookRequest>,
) -> Result<Json<BasketItem>, AppError> {
    if req.passengers < 1 || req.passengers > pricing::PASSENGER_LIMIT {
        return Err(AppError::field(
            "passengers",
            "must be between 1 and 10",
        ));
    }

    let ticket = state
        .catalog
        .get_ticket(&id)
        .await
        .map_err(AppError::from_store)?;

    // Fixed at creation; never recomputed from a later catalog price.
    let total_price = pricing::total_price(ticket.price, req.baggage, req.passengers);
    let booked_by = booked_by_name(&state, &claims).await;

    let draft = BasketDraft {
        uid: claims.sub.clone(),
        flight_number: ticket.flight_number,
        airline: ticket.airline,
        origin_city: ticket.origin_city,
        destination_city: ticket.destination_city,
        departure_at: ticket.departure_at,
        passengers: req.passengers,
        baggage: req.baggage,
        total_price,
        booked_by,
    };

    let item = state
        .basket
        .create(&draft)
        .await
        .map_err(AppError::from_store)?;

    info!("booking {} added to basket for uid {}", item.id, item.uid);
    Ok(Json(item))
}

/// Display name on the booking: cached profile first, then a remote lookup,
/// then empty.
async fn booked_by_name(state: &AppState, claims: &SessionClaims) -> String {
    if let Some(cached) = state.cache.load() {
        if cached.uid == claims.sub && !cached.name.is_empty() {
            return cached.name;
        }
    }

    match state.profiles.find_by_uid(&claims.sub).await {
        Ok(Some(profile)) => profile.name,
        Ok(None) => String::new(),
        Err(err) => {
            tracing::warn!("profile lookup for booking failed: {}", err);
            String::new()
        }
    }
}
