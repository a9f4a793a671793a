use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use skyfare_api::{
    app,
    state::{AppState, AuthConfig},
};
use skyfare_core::geo::GeoPoint;
use skyfare_session::SessionContext;
use skyfare_store::{
    FixedPositionProvider, HttpIdentityProvider, ProfileCache, RestBasketStore, RestClient,
    RestProfileStore, RestTicketCatalog, ReverseGeocodeClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "skyfare_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skyfare_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Skyfare API on port {}", config.server.port);

    let rest = RestClient::new(
        &config.stores.base_url,
        Duration::from_secs(config.stores.timeout_seconds),
    )
    .expect("Failed to build REST client");

    let identity = Arc::new(HttpIdentityProvider::new(
        &config.identity.base_url,
        &config.identity.api_key,
    ));
    let profiles = Arc::new(RestProfileStore::new(rest.clone()));
    let cache = Arc::new(ProfileCache::new(&config.cache.path));

    // Keeps the cached profile in step with the identity observable for the
    // life of the process.
    let _session = SessionContext::spawn(identity.clone(), profiles.clone(), cache.clone());

    let state = AppState {
        identity,
        profiles,
        basket: Arc::new(RestBasketStore::new(rest.clone())),
        catalog: Arc::new(RestTicketCatalog::new(rest)),
        position: Arc::new(FixedPositionProvider::new(GeoPoint {
            latitude: config.geo.latitude,
            longitude: config.geo.longitude,
        })),
        geocoder: Arc::new(ReverseGeocodeClient::new(
            &config.geo.reverse_geocode_url,
            &config.geo.locality_language,
        )),
        cache,
        auth: AuthConfig {
            secret: config.identity.token_secret.clone(),
            expiration: config.identity.token_ttl_seconds,
        },
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
