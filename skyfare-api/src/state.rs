use std::sync::Arc;

use skyfare_core::geo::{PositionProvider, ReverseGeocoder};
use skyfare_core::identity::IdentityProvider;
use skyfare_core::repository::{BasketStore, ProfileStore, TicketCatalog};
use skyfare_store::cache::ProfileCache;

#[derive(Clone)]
pub struct AuthConfig {
    /// Secret the session tokens are signed with.
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub profiles: Arc<dyn ProfileStore>,
    pub basket: Arc<dyn BasketStore>,
    pub catalog: Arc<dyn TicketCatalog>,
    pub position: Arc<dyn PositionProvider>,
    pub geocoder: Arc<dyn ReverseGeocoder>,
    pub cache: Arc<ProfileCache>,
    pub auth: AuthConfig,
}
