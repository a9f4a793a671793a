use async_trait::async_trait;
use serde::Deserialize;
use skyfare_core::geo::{GeoPoint, PositionProvider, ReverseGeocoder};
use skyfare_core::{StoreError, StoreResult};

/// Reverse-geocoding client returning the city at a coordinate pair.
pub struct ReverseGeocodeClient {
    http: reqwest::Client,
    url: String,
    locality_language: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    city: String,
}

impl ReverseGeocodeClient {
    pub fn new(url: &str, locality_language: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.to_string(),
            locality_language: locality_language.to_string(),
        }
    }
}

#[async_trait]
impl ReverseGeocoder for ReverseGeocodeClient {
    async fn city_at(&self, point: GeoPoint) -> StoreResult<String> {
        let response = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", point.latitude.to_string()),
                ("longitude", point.longitude.to_string()),
                ("localityLanguage", self.locality_language.clone()),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status {
                code: status.as_u16(),
            });
        }

        let decoded: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        if decoded.city.is_empty() {
            return Err(StoreError::NotFound);
        }
        Ok(decoded.city)
    }
}

/// Coordinates from configuration, standing in for a browser position API
/// the gateway does not have.
pub struct FixedPositionProvider {
    point: GeoPoint,
}

impl FixedPositionProvider {
    pub fn new(point: GeoPoint) -> Self {
        Self { point }
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    async fn current_position(&self) -> StoreResult<GeoPoint> {
        Ok(self.point)
    }
}
