//! OpenRouteService response DTOs.
//!
//! These types map directly to the ORS JSON API responses. Fields the
//! planner does not use are left out; ORS omits summary fields for
//! zero-length routes, so those default to zero.

use serde::{Deserialize, Serialize};

/// Response from `GET /geocode/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

/// A single geocoding match.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeFeature {
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: GeocodeProperties,
}

/// GeoJSON point: `[lon, lat]`.
#[derive(Debug, Clone, Deserialize)]
pub struct PointGeometry {
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeProperties {
    /// Human-readable label (e.g., "Lviv, LV, Ukraine").
    pub label: Option<String>,
}

/// Request body for `POST /v2/directions/{profile}/geojson`.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    /// Waypoints as `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Response from the GeoJSON directions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub features: Vec<DirectionsFeature>,
}

/// One routed alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsFeature {
    pub properties: DirectionsProperties,
    pub geometry: LineGeometry,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsProperties {
    #[serde(default)]
    pub summary: Summary,
}

/// Route totals.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Summary {
    /// Metres.
    #[serde(default)]
    pub distance: f64,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
}

/// GeoJSON line string: `[[lon, lat], ...]`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

/// Error payload. ORS sends either `{"error": "text"}` or
/// `{"error": {"code": 2010, "message": "text"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Text(String),
    Coded { code: Option<i64>, message: String },
}

impl ErrorDetail {
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Text(text) => text.clone(),
            ErrorDetail::Coded {
                code: Some(code),
                message,
            } => format!("{message} (code {code})"),
            ErrorDetail::Coded {
                code: None,
                message,
            } => message.clone(),
        }
    }
}
