use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub stores: StoresConfig,
    pub identity: IdentityConfig,
    pub geo: GeoConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoresConfig {
    /// Base URL of the hosted REST collections (users, basket, tickets,
    /// special_offers).
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub api_key: String,
    /// Secret for the storefront session tokens minted after provider login.
    pub token_secret: String,
    pub token_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeoConfig {
    pub reverse_geocode_url: String,
    #[serde(default = "default_locality_language")]
    pub locality_language: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn default_locality_language() -> String {
    "en".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    pub path: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of SKYFARE)
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
