//! Session context: one task subscribed to the identity observable, keeping
//! a `{current identity, current profile, loading}` state published for the
//! view layer. Screens receive a handle explicitly; nothing is process-global,
//! and `shutdown` (or dropping the handle) tears the subscription down.

pub mod debounce;

use std::sync::Arc;

use skyfare_core::identity::IdentityProvider;
use skyfare_core::repository::ProfileStore;
use skyfare_shared::models::{Identity, Profile};
use skyfare_store::cache::ProfileCache;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Where the storefront is in the auth lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// The provider has not reported yet; screens show a loading flag.
    Unknown,
    Anonymous,
    /// Identity known, profile still resolving.
    Authenticating { user: Identity },
    Ready {
        user: Identity,
        profile: Option<Profile>,
    },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unknown | Self::Authenticating { .. })
    }

    pub fn user(&self) -> Option<&Identity> {
        match self {
            Self::Authenticating { user } | Self::Ready { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        match self {
            Self::Ready { profile, .. } => profile.as_ref(),
            _ => None,
        }
    }
}

pub struct SessionContext;

impl SessionContext {
    /// Subscribe to the provider's identity observable and keep the session
    /// state published until the handle is shut down or dropped.
    pub fn spawn(
        provider: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        cache: Arc<ProfileCache>,
    ) -> SessionHandle {
        let (tx, rx) = watch::channel(SessionState::Unknown);
        let mut identities = provider.subscribe();

        let task = tokio::spawn(async move {
            let mut was_signed_in = false;
            loop {
                let identity = identities.borrow_and_update().clone();
                match identity {
                    None => {
                        // Sign-out clears the cached profile; the initial
                        // report is not a sign-out.
                        if was_signed_in {
                            cache.clear();
                        }
                        was_signed_in = false;
                        debug!("session: anonymous");
                        let _ = tx.send(SessionState::Anonymous);
                    }
                    Some(user) => {
                        was_signed_in = true;
                        let _ = tx.send(SessionState::Authenticating { user: user.clone() });
                        let profile = resolve_profile(&*profiles, &cache, &user).await;
                        debug!("session: ready for uid {}", user.uid);
                        let _ = tx.send(SessionState::Ready { user, profile });
                    }
                }

                if identities.changed().await.is_err() {
                    break;
                }
            }
        });

        SessionHandle { state: rx, task }
    }
}

/// Cache first, remote lookup as the fallback. A failed lookup still settles
/// the session; the profile is simply absent.
async fn resolve_profile(
    profiles: &dyn ProfileStore,
    cache: &ProfileCache,
    user: &Identity,
) -> Option<Profile> {
    if let Some(cached) = cache.load() {
        if cached.uid == user.uid {
            return Some(cached);
        }
    }

    match profiles.find_by_uid(&user.uid).await {
        Ok(profile) => profile,
        Err(err) => {
            warn!("profile lookup failed for uid {}: {}", user.uid, err);
            None
        }
    }
}

pub struct SessionHandle {
    state: watch::Receiver<SessionState>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Explicit teardown of the identity subscription.
    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
