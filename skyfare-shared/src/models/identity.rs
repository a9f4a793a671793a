use serde::{Deserialize, Serialize};

/// A user identity as issued by the hosted auth provider. Immutable from this
/// application's side except through the provider's own account operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}
