use dospot_domain::Coordinates;
use std::time::Duration;
use tracing::warn;

/// Label used when the geocoder knows no address for a point
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// The device location services.
#[async_trait::async_trait]
pub trait ILocationProvider: Send + Sync {
    /// One-shot position fix. `None` on missing permission or provider
    /// failure.
    async fn current_location(&self) -> Option<Coordinates>;
    /// Best matching address line for the point, `None` when there is none
    async fn reverse_geocode(&self, coordinates: Coordinates) -> anyhow::Result<Option<String>>;
}

/// A position together with the label shown for it
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedLocation {
    pub coordinates: Coordinates,
    pub location_name: String,
}

/// Fetches the current position, giving up after `timeout`.
///
/// Timeouts, missing permissions and provider errors all end up as `None`:
/// callers cannot and need not tell them apart.
pub async fn capture_location(
    provider: &dyn ILocationProvider,
    timeout: Duration,
) -> Option<CapturedLocation> {
    let coordinates = match tokio::time::timeout(timeout, provider.current_location()).await {
        Ok(Some(coordinates)) => coordinates,
        Ok(None) => {
            warn!("Location provider returned no position");
            return None;
        }
        Err(_) => {
            warn!("Location request timed out after {:?}", timeout);
            return None;
        }
    };
    let location_name = resolve_address(provider, coordinates).await;

    Some(CapturedLocation {
        coordinates,
        location_name,
    })
}

/// Address for `coordinates`, falling back to a coordinate label when the
/// geocoder fails
pub async fn resolve_address(provider: &dyn ILocationProvider, coordinates: Coordinates) -> String {
    match provider.reverse_geocode(coordinates).await {
        Ok(Some(address)) if !address.trim().is_empty() => address,
        Ok(_) => UNKNOWN_LOCATION.to_string(),
        Err(e) => {
            warn!("Reverse geocoding failed: {:?}", e);
            coordinates.fallback_label()
        }
    }
}

/// Provider reporting the same answers every time. Used where no device
/// location services exist, for example in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedLocationProvider {
    pub coordinates: Option<Coordinates>,
    pub address: Option<String>,
    /// Makes `reverse_geocode` fail
    pub geocoder_fails: bool,
    /// Delay before `current_location` answers
    pub delay: Option<Duration>,
}

impl FixedLocationProvider {
    pub fn at(coordinates: Coordinates, address: impl Into<String>) -> Self {
        Self {
            coordinates: Some(coordinates),
            address: Some(address.into()),
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl ILocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Option<Coordinates> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.coordinates
    }

    async fn reverse_geocode(&self, _coordinates: Coordinates) -> anyhow::Result<Option<String>> {
        if self.geocoder_fails {
            anyhow::bail!("Geocoder unavailable");
        }
        Ok(self.address.clone())
    }
}
