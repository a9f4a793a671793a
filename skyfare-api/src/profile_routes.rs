use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use skyfare_core::validation::{self, FieldErrors};
use skyfare_shared::models::Profile;
use tracing::info;

use crate::error::AppError;
use crate::middleware::auth::SessionClaims;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/profile",
        get(profile_screen).put(update_profile).delete(delete_profile),
    )
}

async fn profile_screen(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<Profile>, AppError> {
    if let Some(cached) = state.cache.load() {
        if cached.uid == claims.sub {
            return Ok(Json(cached));
        }
    }

    let profile = state
        .profiles
        .find_by_uid(&claims.sub)
        .await
        .map_err(AppError::from_store)?
        .ok_or_else(|| AppError::NotFoundError("profile not found".to_string()))?;

    Ok(Json(profile))
}

/// Editable fields of the profile screen. The store has no partial patch, so
/// the handler sends the full record.
#[derive(Debug, Deserialize)]
struct ProfileUpdate {
    name: String,
    lastname: String,
    avatar: String,
    telephone: String,
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    let mut errors = FieldErrors::new();
    if !update.telephone.is_empty() {
        if let Some(message) = validation::telephone_error(&update.telephone) {
            errors.insert("telephone".to_string(), message);
        }
    }
    if let Some(message) = validation::avatar_error(&update.avatar) {
        errors.insert("avatar".to_string(), message);
    }
    if !errors.is_empty() {
        return Err(AppError::ValidationError(errors));
    }

    let current = current_profile(&state, &claims).await?;
    let record = Profile {
        name: update.name,
        lastname: update.lastname,
        avatar: update.avatar,
        telephone: update.telephone,
        ..current
    };

    let saved = state
        .profiles
        .update(&record.id, &record)
        .await
        .map_err(AppError::from_store)?;

    // The server's returned record is the one that goes back into the cache.
    state.cache.store(&saved);
    Ok(Json(saved))
}

async fn delete_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<StatusCode, AppError> {
    let profile = current_profile(&state, &claims).await?;

    // 1. Remove the profile row.
    state
        .profiles
        .delete(&profile.id)
        .await
        .map_err(AppError::from_store)?;

    // 2. Delete the provider account. A stale session fails here with its
    //    own instructive message; the row is already gone and the failure is
    //    reported, not retried.
    state
        .identity
        .delete_account(&claims.provider_token)
        .await
        .map_err(AppError::from_store)?;

    // 3. Sign out and drop the cached profile.
    state.identity.sign_out().await;
    state.cache.clear();

    info!("account deleted for uid {}", claims.sub);
    Ok(StatusCode::NO_CONTENT)
}

async fn current_profile(state: &AppState, claims: &SessionClaims) -> Result<Profile, AppError> {
    if let Some(cached) = state.cache.load() {
        if cached.uid == claims.sub {
            return Ok(cached);
        }
    }

    state
        .profiles
        .find_by_uid(&claims.sub)
        .await
        .map_err(AppError::from_store)?
        .ok_or_else(|| AppError::NotFoundError("profile not found".to_string()))
}
