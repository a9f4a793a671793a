use async_trait::async_trait;

use crate::StoreResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Source of the user's coordinates.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    async fn current_position(&self) -> StoreResult<GeoPoint>;
}

/// Third-party reverse-geocoding service: coordinates to a city name.
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn city_at(&self, point: GeoPoint) -> StoreResult<String>;
}

/// Best-effort city detection for the home screen. Any failure along the way
/// degrades to `None`; the screen simply leaves the origin field empty.
pub async fn resolve_city(
    position: &dyn PositionProvider,
    geocoder: &dyn ReverseGeocoder,
) -> Option<String> {
    let point = match position.current_position().await {
        Ok(point) => point,
        Err(err) => {
            tracing::warn!("position lookup failed: {}", err);
            return None;
        }
    };

    match geocoder.city_at(point).await {
        Ok(city) if !city.is_empty() => Some(city),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!("reverse geocode failed: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;

    struct FixedPosition(GeoPoint);

    #[async_trait]
    impl PositionProvider for FixedPosition {
        async fn current_position(&self) -> StoreResult<GeoPoint> {
            Ok(self.0)
        }
    }

    struct FailingPosition;

    #[async_trait]
    impl PositionProvider for FailingPosition {
        async fn current_position(&self) -> StoreResult<GeoPoint> {
            Err(StoreError::Unreachable("no position source".into()))
        }
    }

    struct FixedCity(&'static str);

    #[async_trait]
    impl ReverseGeocoder for FixedCity {
        async fn city_at(&self, _point: GeoPoint) -> StoreResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn resolves_city_from_position() {
        let position = FixedPosition(GeoPoint {
            latitude: 52.37,
            longitude: 4.9,
        });
        let city = resolve_city(&position, &FixedCity("Amsterdam")).await;
        assert_eq!(city.as_deref(), Some("Amsterdam"));
    }

    #[tokio::test]
    async fn degrades_to_none_on_any_failure() {
        let city = resolve_city(&FailingPosition, &FixedCity("Amsterdam")).await;
        assert_eq!(city, None);

        let position = FixedPosition(GeoPoint {
            latitude: 0.0,
            longitude: 0.0,
        });
        let city = resolve_city(&position, &FixedCity("")).await;
        assert_eq!(city, None);
    }
}
