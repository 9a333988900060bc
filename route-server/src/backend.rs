//! Runtime choice between the live routing service and the offline atlas.

use tracing::info;

use crate::cache::{CacheConfig, CachedGeoResolver};
use crate::config::BackendConfig;
use crate::domain::{LonLat, Profile};
use crate::offline::{AtlasError, OfflineAtlas};
use crate::ors::{OrsClient, OrsConfig, OrsError};
use crate::planner::{
    Directions, DirectionsProvider, GeoResolver, Place, ProviderError, ResolveError,
    RouteAggregator,
};

/// Errors from setting up a backend. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to create routing client: {0}")]
    Ors(#[from] OrsError),

    #[error("failed to load offline atlas: {0}")]
    Atlas(#[from] AtlasError),
}

/// Place resolution backend.
pub enum GeoBackend {
    Live(CachedGeoResolver<OrsClient>),
    Offline(OfflineAtlas),
}

/// Directions backend.
pub enum DirectionsBackend {
    Live(OrsClient),
    Offline(OfflineAtlas),
}

/// The aggregator the server runs.
pub type Aggregator = RouteAggregator<GeoBackend, DirectionsBackend>;

impl GeoResolver for GeoBackend {
    async fn resolve(&self, place: &str) -> Result<Place, ResolveError> {
        match self {
            GeoBackend::Live(resolver) => resolver.resolve(place).await,
            GeoBackend::Offline(atlas) => atlas.resolve(place).await,
        }
    }
}

impl DirectionsProvider for DirectionsBackend {
    async fn route(
        &self,
        start: LonLat,
        end: LonLat,
        profile: Profile,
    ) -> Result<Directions, ProviderError> {
        match self {
            DirectionsBackend::Live(client) => client.route(start, end, profile).await,
            DirectionsBackend::Offline(atlas) => atlas.route(start, end, profile).await,
        }
    }
}

/// Build the place and directions backends from configuration.
///
/// The live backend shares one HTTP client, and so one concurrency limit,
/// between geocoding and directions.
pub fn build_backends(
    config: &BackendConfig,
    cache: &CacheConfig,
) -> Result<(GeoBackend, DirectionsBackend), BackendError> {
    match config {
        BackendConfig::Live { api_key, base_url } => {
            let mut ors_config = OrsConfig::new(api_key);
            if let Some(url) = base_url {
                ors_config = ors_config.with_base_url(url);
            }
            let client = OrsClient::new(ors_config)?;
            Ok((
                GeoBackend::Live(CachedGeoResolver::new(client.clone(), cache)),
                DirectionsBackend::Live(client),
            ))
        }
        BackendConfig::Offline { atlas_path } => {
            let atlas = OfflineAtlas::load(atlas_path)?;
            info!(places = atlas.len(), path = %atlas_path.display(), "Loaded offline atlas");
            Ok((
                GeoBackend::Offline(atlas.clone()),
                DirectionsBackend::Offline(atlas),
            ))
        }
    }
}

impl GeoBackend {
    pub fn describe(&self) -> &'static str {
        match self {
            GeoBackend::Live(_) => "OpenRouteService",
            GeoBackend::Offline(_) => "offline atlas",
        }
    }
}
