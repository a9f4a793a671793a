use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use skyfare_core::geo;
use skyfare_shared::models::SpecialOffer;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

#[derive(Debug, Serialize)]
struct HomeScreen {
    /// Detected origin city; null when detection fails, the field stays empty.
    city: Option<String>,
    special_offers: Vec<SpecialOffer>,
}

/// Home screen: detected city plus the special-offers carousel. Both parts
/// degrade independently; this endpoint never fails.
async fn home(State(state): State<AppState>) -> Json<HomeScreen> {
    let city = geo::resolve_city(&*state.position, &*state.geocoder).await;

    let special_offers = match state.catalog.special_offers().await {
        Ok(offers) => offers,
        Err(err) => {
            tracing::warn!("failed to load special offers: {}", err);
            Vec::new()
        }
    };

    Json(HomeScreen {
        city,
        special_offers,
    })
}
