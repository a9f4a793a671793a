use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use skyfare_core::identity::AuthSession;
use skyfare_core::validation::{self, LoginForm, RegistrationForm};
use skyfare_shared::models::{NewProfile, Profile};
use tracing::info;

use crate::error::AppError;
use crate::middleware::auth::SessionClaims;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
struct FederatedLoginRequest {
    /// Token obtained from the federated provider out-of-band.
    provider_token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/login/federated", post(login_federated))
        .route("/logout", post(logout))
}

async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<SessionResponse>, AppError> {
    // 1. Validate inline; nothing leaves the process on failure.
    let errors = validation::validate_registration(&form);
    if !errors.is_empty() {
        return Err(AppError::ValidationError(errors));
    }

    // 2. Create the provider account.
    let session = state
        .identity
        .create_account(&form.email, &form.password)
        .await
        .map_err(AppError::from_store)?;

    // 3. Create the matching profile row.
    let profile = state
        .profiles
        .create(&NewProfile {
            uid: session.identity.uid.clone(),
            email: session.identity.email.clone(),
            name: form.name.clone(),
            lastname: form.lastname.clone(),
            avatar: form.avatar.clone(),
            telephone: form.telephone.clone(),
        })
        .await
        .map_err(AppError::from_store)?;

    // 4. Warm the cache and issue the session token.
    state.cache.store(&profile);
    let token = issue_token(&state, &session)?;

    info!("registered {}", session.identity.email);
    Ok(Json(SessionResponse {
        token,
        profile: Some(profile),
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionResponse>, AppError> {
    let errors = validation::validate_login(&form);
    if !errors.is_empty() {
        return Err(AppError::ValidationError(errors));
    }

    let session = state
        .identity
        .sign_in(&form.email, &form.password)
        .await
        .map_err(AppError::from_store)?;

    // A missing profile row is not a login failure; the screen degrades.
    let profile = match state
        .profiles
        .find_by_email(&session.identity.email)
        .await
    {
        Ok(profile) => profile,
        Err(err) => {
            tracing::warn!("profile lookup after login failed: {}", err);
            None
        }
    };
    if let Some(profile) = &profile {
        state.cache.store(profile);
    }

    let token = issue_token(&state, &session)?;
    Ok(Json(SessionResponse { token, profile }))
}

async fn login_federated(
    State(state): State<AppState>,
    Json(req): Json<FederatedLoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state
        .identity
        .sign_in_with_idp(&req.provider_token)
        .await
        .map_err(AppError::from_store)?;

    let profile = match state
        .profiles
        .find_by_email(&session.identity.email)
        .await
        .map_err(AppError::from_store)?
    {
        Some(profile) => profile,
        None => {
            // First federated login: seed the profile row from the identity.
            state
                .profiles
                .create(&NewProfile {
                    uid: session.identity.uid.clone(),
                    email: session.identity.email.clone(),
                    name: session.identity.display_name.clone().unwrap_or_default(),
                    lastname: String::new(),
                    avatar: session.identity.photo_url.clone().unwrap_or_default(),
                    telephone: String::new(),
                })
                .await
                .map_err(AppError::from_store)?
        }
    };

    state.cache.store(&profile);
    let token = issue_token(&state, &session)?;
    Ok(Json(SessionResponse {
        token,
        profile: Some(profile),
    }))
}

async fn logout(State(state): State<AppState>) -> StatusCode {
    state.identity.sign_out().await;
    state.cache.clear();
    StatusCode::NO_CONTENT
}

fn issue_token(state: &AppState, session: &AuthSession) -> Result<String, AppError> {
    let claims = SessionClaims {
        sub: session.identity.uid.clone(),
        email: session.identity.email.clone(),
        provider_token: session.id_token.clone(),
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))
}
