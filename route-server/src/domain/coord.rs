//! Coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A (longitude, latitude) pair in decimal degrees.
///
/// Serialized as a `[lon, lat]` array, the same order GeoJSON uses.
///
/// # Examples
///
/// ```
/// use route_server::domain::LonLat;
///
/// let kyiv = LonLat::new(30.5234, 50.4501).unwrap();
/// assert_eq!(kyiv.lon(), 30.5234);
///
/// // Latitude outside [-90, 90] is rejected
/// assert!(LonLat::new(0.0, 91.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    lon: f64,
    lat: f64,
}

impl LonLat {
    /// Create a coordinate pair, rejecting NaN and out-of-range values.
    pub fn new(lon: f64, lat: f64) -> Result<Self, DomainError> {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(DomainError::InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    fn is_valid(&self) -> bool {
        Self::new(self.lon, self.lat).is_ok()
    }
}

impl TryFrom<[f64; 2]> for LonLat {
    type Error = DomainError;

    fn try_from([lon, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lon, lat)
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(c: LonLat) -> Self {
        [c.lon, c.lat]
    }
}

impl fmt::Debug for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LonLat({}, {})", self.lon, self.lat)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lon, self.lat)
    }
}

/// Great-circle distance between two points in kilometres (haversine).
///
/// Symmetric, and zero for identical points. Both inputs must be valid
/// coordinates; `LonLat` guarantees that for values built through
/// [`LonLat::new`].
pub fn great_circle_km(a: LonLat, b: LonLat) -> f64 {
    debug_assert!(a.is_valid() && b.is_valid(), "invalid coordinate input");

    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord_strategy() -> impl Strategy<Value = LonLat> {
        (-180.0f64..=180.0, -90.0f64..=90.0).prop_map(|(lon, lat)| LonLat::new(lon, lat).unwrap())
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coord_strategy(), b in coord_strategy()) {
            let ab = great_circle_km(a, b);
            let ba = great_circle_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9, "d(a,b)={} d(b,a)={}", ab, ba);
        }

        #[test]
        fn distance_to_self_is_zero(a in coord_strategy()) {
            prop_assert_eq!(great_circle_km(a, a), 0.0);
        }

        #[test]
        fn distance_is_bounded(a in coord_strategy(), b in coord_strategy()) {
            let d = great_circle_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
