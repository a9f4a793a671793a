use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyfare_core::validation::FieldErrors;
use skyfare_core::StoreError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(FieldErrors),
    NotFoundError(String),
    ConflictError(String),
    ServiceError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// Single-field validation failure.
    pub fn field(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.to_string());
        Self::ValidationError(errors)
    }

    /// Map hosted-service failures onto HTTP semantics. The blanket anyhow
    /// conversion below would flatten everything to 500, so call sites that
    /// talk to a store go through this instead.
    pub fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFoundError("record not found".to_string()),
            StoreError::EmailTaken => {
                Self::ConflictError("an account with this email already exists".to_string())
            }
            StoreError::InvalidCredentials => {
                Self::AuthenticationError("invalid email or password".to_string())
            }
            StoreError::RequiresRecentLogin => Self::AuthenticationError(
                "deleting the account needs a recent sign-in: sign out, sign in again, then retry"
                    .to_string(),
            ),
            StoreError::Unreachable(msg) => Self::ServiceError(msg),
            other => Self::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::AuthenticationError(msg) => {
                (StatusCode::UNAUTHORIZED, json!({ "error": msg }))
            }
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, json!({ "error": msg })),
            AppError::ValidationError(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::ServiceError(msg) => {
                tracing::warn!("upstream service failure: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Service temporarily unavailable" }),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Anyhow(err.into())
    }
}
