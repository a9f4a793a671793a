use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skyfare_shared::models::Identity;
use tokio::sync::watch;

use crate::StoreResult;

/// A signed-in provider session: the identity plus its bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub identity: Identity,
    pub id_token: String,
    /// Token lifetime in seconds, as reported by the provider.
    pub expires_in: u64,
}

/// Hosted authentication service: account lifecycle plus a current-identity
/// observable.
///
/// `subscribe` returns a watch receiver carrying the latest identity; every
/// successful sign-in or sign-up publishes `Some`, sign-out publishes `None`.
/// Dropping the receiver is the unsubscribe; there is no callback to
/// deregister.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> StoreResult<AuthSession>;

    async fn sign_in(&self, email: &str, password: &str) -> StoreResult<AuthSession>;

    /// Federated sign-in with a token obtained out-of-band (the popup analog).
    async fn sign_in_with_idp(&self, provider_token: &str) -> StoreResult<AuthSession>;

    async fn sign_out(&self);

    /// Requires a recently-issued token; stale sessions fail with
    /// [`crate::StoreError::RequiresRecentLogin`].
    async fn delete_account(&self, id_token: &str) -> StoreResult<()>;

    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
