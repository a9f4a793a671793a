use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Serialize;
use skyfare_shared::models::BasketItem;
use tracing::info;

use crate::error::AppError;
use crate::middleware::auth::SessionClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/basket", get(list_basket))
        .route("/basket/{id}", delete(delete_item))
        .route("/booked/{id}", get(booked_detail))
}

#[derive(Debug, Serialize)]
struct BasketScreen {
    items: Vec<BasketItem>,
    total: f64,
}

async fn list_basket(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<BasketScreen>, AppError> {
    let items = state
        .basket
        .list_for_owner(&claims.sub)
        .await
        .map_err(AppError::from_store)?;

    let total = items.iter().map(|item| item.total_price).sum();
    Ok(Json(BasketScreen { items, total }))
}

async fn delete_item(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    // The hosted store accepts any delete; ownership is enforced here.
    let item = state.basket.get(&id).await.map_err(AppError::from_store)?;
    if item.uid != claims.sub {
        return Err(AppError::AuthorizationError(
            "booking belongs to another account".to_string(),
        ));
    }

    // Nothing changes for the caller until the store confirms.
    state
        .basket
        .delete(&id)
        .await
        .map_err(AppError::from_store)?;

    info!("basket item {} deleted by uid {}", id, claims.sub);
    Ok(StatusCode::NO_CONTENT)
}

async fn booked_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<String>,
) -> Result<Json<BasketItem>, AppError> {
    let item = state.basket.get(&id).await.map_err(AppError::from_store)?;
    if item.uid != claims.sub {
        return Err(AppError::AuthorizationError(
            "booking belongs to another account".to_string(),
        ));
    }
    Ok(Json(item))
}
