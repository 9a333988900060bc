//! Capabilities the planner needs from the outside world.
//!
//! The aggregator only talks to these traits, so it can be driven by the
//! live routing service, the offline atlas, or test mocks.

use std::future::Future;

use crate::domain::{LonLat, Profile};

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub location: LonLat,
    /// Canonical label reported by the resolver (e.g. "Lviv, Ukraine").
    pub label: String,
}

/// Result of a directions request.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    pub distance_m: f64,
    pub duration_s: f64,
    /// Ordered path vertices.
    pub geometry: Vec<LonLat>,
}

/// Error from place resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// No place matches the text
    #[error("place not found: {place}")]
    NotFound { place: String },

    /// The geocoding service failed
    #[error("geocoding failed: {message}")]
    Service { message: String },
}

/// Error from the directions provider: an error status or a payload that
/// could not be understood.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("directions provider error: {message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Resolves free-text place names to coordinates.
pub trait GeoResolver: Send + Sync {
    fn resolve(&self, place: &str) -> impl Future<Output = Result<Place, ResolveError>> + Send;
}

/// Computes real travel routes between two points.
pub trait DirectionsProvider: Send + Sync {
    fn route(
        &self,
        start: LonLat,
        end: LonLat,
        profile: Profile,
    ) -> impl Future<Output = Result<Directions, ProviderError>> + Send;
}

impl<T: GeoResolver> GeoResolver for std::sync::Arc<T> {
    fn resolve(&self, place: &str) -> impl Future<Output = Result<Place, ResolveError>> + Send {
        (**self).resolve(place)
    }
}

impl<T: DirectionsProvider> DirectionsProvider for std::sync::Arc<T> {
    fn route(
        &self,
        start: LonLat,
        end: LonLat,
        profile: Profile,
    ) -> impl Future<Output = Result<Directions, ProviderError>> + Send {
        (**self).route(start, end, profile)
    }
}
