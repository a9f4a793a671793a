use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skyfare_core::search::{self, SearchQuery, SortMode};
use skyfare_shared::models::Ticket;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/booking", get(booking))
}

#[derive(Debug, Deserialize)]
struct BookingParams {
    #[serde(default)]
    from: String,
    #[serde(default)]
    to: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    sort: String,
    #[serde(default)]
    airline: String,
}

#[derive(Debug, Serialize)]
struct BookingScreen {
    tickets: Vec<Ticket>,
    /// Airlines available in the narrowed list, for the filter dropdown.
    airlines: Vec<String>,
    no_results: bool,
}

/// Booking results screen. Every request refetches the full catalog and runs
/// the pipeline from the unfiltered list; filters never accumulate across
/// requests.
async fn booking(
    State(state): State<AppState>,
    Query(params): Query<BookingParams>,
) -> Result<Json<BookingScreen>, AppError> {
    let date = parse_date(&params.date)?;
    let sort = SortMode::parse(&params.sort)
        .ok_or_else(|| AppError::field("sort", "expected default, price_asc or price_desc"))?;

    let all = state
        .catalog
        .list_tickets()
        .await
        .map_err(AppError::from_store)?;

    // Two stages, as on the screen: the route/date inputs narrow the list the
    // airline dropdown is built from, then the dropdown and sort order apply.
    let narrowed = search::apply(
        &all,
        &SearchQuery {
            origin: params.from,
            destination: params.to,
            date,
            airline: None,
            sort: SortMode::Default,
        },
    );
    let airlines = search::unique_airlines(&narrowed);

    let tickets = search::apply(
        &narrowed,
        &SearchQuery {
            airline: Some(params.airline).filter(|a| !a.is_empty()),
            sort,
            ..Default::default()
        },
    );

    let no_results = tickets.is_empty();
    Ok(Json(BookingScreen {
        tickets,
        airlines,
        no_results,
    }))
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, AppError> {
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::field("date", "expected YYYY-MM-DD"))
}
