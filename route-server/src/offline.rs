//! Offline place table and straight-line directions.
//!
//! Loads places from a JSON file and answers directions requests with a
//! straight line at a nominal speed per profile. Useful for development
//! and demos without OpenRouteService credentials.
//!
//! The file is a JSON array:
//!
//! ```json
//! [
//!   { "name": "Kyiv", "label": "Kyiv, Ukraine", "lon": 30.5234, "lat": 50.4501 },
//!   { "name": "Lviv", "lon": 24.0297, "lat": 49.8397 }
//! ]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{DomainError, LonLat, Profile, great_circle_km};
use crate::planner::{
    Directions, DirectionsProvider, GeoResolver, Place, ProviderError, ResolveError,
};

/// Nominal speed for straight-line directions, km/h.
pub fn nominal_speed_kmh(profile: Profile) -> f64 {
    match profile {
        Profile::DrivingCar => 80.0,
        Profile::CyclingRegular => 15.0,
        Profile::FootWalking => 5.0,
    }
}

/// Errors from loading an atlas file.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("failed to read atlas file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse atlas file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid coordinate for {name}: {source}")]
    InvalidCoordinate { name: String, source: DomainError },

    #[error("atlas contains no places")]
    Empty,
}

/// One entry of the atlas file.
#[derive(Debug, Clone, Deserialize)]
struct AtlasEntry {
    name: String,
    label: Option<String>,
    lon: f64,
    lat: f64,
}

/// In-memory place table that doubles as a directions provider.
#[derive(Debug, Clone)]
pub struct OfflineAtlas {
    /// Places keyed by lowercase name.
    places: HashMap<String, Place>,
}

impl OfflineAtlas {
    /// Load an atlas from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AtlasError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse an atlas from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AtlasError> {
        let entries: Vec<AtlasEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(AtlasError::Empty);
        }

        let mut places = HashMap::with_capacity(entries.len());
        for entry in entries {
            let location = LonLat::new(entry.lon, entry.lat).map_err(|source| {
                AtlasError::InvalidCoordinate {
                    name: entry.name.clone(),
                    source,
                }
            })?;
            let label = entry.label.unwrap_or_else(|| entry.name.clone());
            places.insert(entry.name.trim().to_lowercase(), Place { location, label });
        }

        Ok(Self { places })
    }

    /// Number of known places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Look up a place by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&Place> {
        self.places.get(&name.trim().to_lowercase())
    }
}

impl GeoResolver for OfflineAtlas {
    async fn resolve(&self, place: &str) -> Result<Place, ResolveError> {
        self.get(place).cloned().ok_or_else(|| ResolveError::NotFound {
            place: place.to_string(),
        })
    }
}

impl DirectionsProvider for OfflineAtlas {
    async fn route(
        &self,
        start: LonLat,
        end: LonLat,
        profile: Profile,
    ) -> Result<Directions, ProviderError> {
        let km = great_circle_km(start, end);
        Ok(Directions {
            distance_m: km * 1000.0,
            duration_s: km / nominal_speed_kmh(profile) * 3600.0,
            geometry: vec![start, end],
        })
    }
}
