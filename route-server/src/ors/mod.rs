//! OpenRouteService client.
//!
//! This module provides an HTTP client for the OpenRouteService API, which
//! backs both place resolution (Pelias geocoding) and live directions for
//! the car, bicycle and walking modes.
//!
//! Key characteristics of ORS:
//! - Coordinates are always `[lon, lat]`
//! - Geocoding is restricted to the `locality` layer (cities)
//! - The GeoJSON directions endpoint always returns a `features` array,
//!   and omits summary totals for zero-length routes

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, OrsClient, OrsConfig};
pub use convert::{parse_directions, parse_geocode};
pub use error::OrsError;
