//! Conversion from ORS DTOs to planner types.

use crate::domain::LonLat;
use crate::planner::{Directions, Place};

use super::error::OrsError;
use super::types::{DirectionsResponse, ErrorResponse, GeocodeResponse};

/// Parse a geocoding response body.
///
/// Returns `Ok(None)` when the service found no match for `place`. The
/// label falls back to the query text when ORS does not send one.
pub fn parse_geocode(body: &str, place: &str) -> Result<Option<Place>, OrsError> {
    let response: GeocodeResponse = parse_json(body)?;

    let Some(feature) = response.features.into_iter().next() else {
        return Ok(None);
    };

    let [lon, lat] = feature.geometry.coordinates;
    let location = LonLat::new(lon, lat)?;
    let label = feature
        .properties
        .label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| place.to_string());

    Ok(Some(Place { location, label }))
}

/// Parse a GeoJSON directions response body.
///
/// An error payload or a response without features is an error; only the
/// first feature is used.
pub fn parse_directions(body: &str) -> Result<Directions, OrsError> {
    if let Ok(error) = serde_json::from_str::<ErrorResponse>(body) {
        return Err(OrsError::Routing(error.error.message()));
    }

    let response: DirectionsResponse = parse_json(body)?;

    let feature = response
        .features
        .into_iter()
        .next()
        .ok_or(OrsError::NoFeatures)?;

    let geometry = feature
        .geometry
        .coordinates
        .into_iter()
        .map(LonLat::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let summary = feature.properties.summary;

    Ok(Directions {
        distance_m: summary.distance,
        duration_s: summary.duration,
        geometry,
    })
}

/// Extract a readable message from an error body, if it has one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error.message())
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, OrsError> {
    serde_json::from_str(body).map_err(|e| OrsError::Json {
        message: e.to_string(),
        body: Some(body.chars().take(500).collect()),
    })
}
