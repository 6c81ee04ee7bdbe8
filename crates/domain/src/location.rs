use serde::{Deserialize, Serialize};

/// A point on the globe as captured by the device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `(0.0, 0.0)` is reserved for "no location captured". Non-finite
    /// values never come from a real fix.
    pub fn is_captured(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    /// Label used in place of an address when reverse geocoding fails
    pub fn fallback_label(&self) -> String {
        format!("Lat: {}, Lng: {}", self.latitude, self.longitude)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
