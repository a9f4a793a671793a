pub mod app_config;
pub mod basket_repo;
pub mod cache;
pub mod catalog_repo;
pub mod geo;
pub mod identity;
pub mod profile_repo;
pub mod rest;

pub use basket_repo::RestBasketStore;
pub use cache::ProfileCache;
pub use catalog_repo::RestTicketCatalog;
pub use geo::{FixedPositionProvider, ReverseGeocodeClient};
pub use identity::HttpIdentityProvider;
pub use profile_repo::RestProfileStore;
pub use rest::RestClient;
