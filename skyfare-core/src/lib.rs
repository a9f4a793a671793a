pub mod geo;
pub mod identity;
pub mod pricing;
pub mod repository;
pub mod search;
pub mod validation;

/// Failures from the hosted services this storefront delegates to. No call
/// is retried automatically anywhere; callers surface the failure and
/// abandon the operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unreachable(String),
    #[error("store returned status {code}")]
    Status { code: u16 },
    #[error("failed to decode store response: {0}")]
    Decode(String),
    #[error("record not found")]
    NotFound,
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("recent sign-in required for this operation")]
    RequiresRecentLogin,
    #[error("cache io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
