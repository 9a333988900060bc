//! OpenRouteService HTTP client.
//!
//! Provides async methods for geocoding place names and requesting
//! directions. Handles authentication, request bounding, and conversion to
//! planner types.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LonLat, Profile};
use crate::planner::{
    Directions, DirectionsProvider, GeoResolver, Place, ProviderError, ResolveError,
};

use super::convert::{error_message, parse_directions, parse_geocode};
use super::error::OrsError;
use super::types::DirectionsRequest;

/// Default base URL for the OpenRouteService API.
pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the ORS client.
#[derive(Debug, Clone)]
pub struct OrsConfig {
    /// API key, sent in the `Authorization` header
    pub api_key: String,
    /// Base URL for the API (defaults to the public ORS endpoint)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Geocoding request timeout in seconds
    pub geocode_timeout_secs: u64,
    /// Directions request timeout in seconds
    pub directions_timeout_secs: u64,
}

impl OrsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            geocode_timeout_secs: 30,
            directions_timeout_secs: 60,
        }
    }

    /// Set a custom base URL (for self-hosted ORS or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeouts.
    pub fn with_timeouts(mut self, geocode_secs: u64, directions_secs: u64) -> Self {
        self.geocode_timeout_secs = geocode_secs;
        self.directions_timeout_secs = directions_secs;
        self
    }
}

/// OpenRouteService API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct OrsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
    geocode_timeout: Duration,
    directions_timeout: Duration,
}

impl OrsClient {
    /// Create a new ORS client with the given configuration.
    pub fn new(config: OrsConfig) -> Result<Self, OrsError> {
        if config.api_key.trim().is_empty() {
            return Err(OrsError::NotConfigured("API key is empty".to_string()));
        }
        if config.max_concurrent == 0 {
            return Err(OrsError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| OrsError::NotConfigured("invalid API key format".to_string()))?;
        headers.insert(reqwest::header::AUTHORIZATION, api_key);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            geocode_timeout: Duration::from_secs(config.geocode_timeout_secs),
            directions_timeout: Duration::from_secs(config.directions_timeout_secs),
        })
    }

    /// Look up a place name, restricted to cities.
    ///
    /// Returns `Ok(None)` when nothing matches.
    pub async fn geocode(&self, place: &str) -> Result<Option<Place>, OrsError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/geocode/search", self.base_url);
        debug!(place, "Geocoding");

        let response = self
            .http
            .get(&url)
            .query(&[("text", place), ("size", "1"), ("layers", "locality")])
            .timeout(self.geocode_timeout)
            .send()
            .await?;

        let body = check_status(response).await?;
        parse_geocode(&body, place)
    }

    /// Request directions between two points for a routing profile.
    pub async fn directions(
        &self,
        start: LonLat,
        end: LonLat,
        profile: Profile,
    ) -> Result<Directions, OrsError> {
        let _permit = self.acquire().await?;

        let url = format!("{}/v2/directions/{}/geojson", self.base_url, profile);
        debug!(%profile, %start, %end, "Requesting directions");

        let request = DirectionsRequest {
            coordinates: vec![start.into(), end.into()],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .timeout(self.directions_timeout)
            .send()
            .await?;

        let body = check_status(response).await?;
        parse_directions(&body)
    }

    async fn acquire(&self) -> Result<tokio::sync::SemaphorePermit<'_>, OrsError> {
        self.semaphore
            .acquire()
            .await
            .map_err(|_| OrsError::NotConfigured("request semaphore closed".to_string()))
    }
}

/// Map error statuses to `OrsError`, returning the body on success.
async fn check_status(response: reqwest::Response) -> Result<String, OrsError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(OrsError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(OrsError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or(body);
        return Err(OrsError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.text().await?)
}

impl GeoResolver for OrsClient {
    async fn resolve(&self, place: &str) -> Result<Place, ResolveError> {
        match self.geocode(place).await {
            Ok(Some(resolved)) => Ok(resolved),
            Ok(None) => Err(ResolveError::NotFound {
                place: place.to_string(),
            }),
            Err(e) => Err(ResolveError::Service {
                message: e.to_string(),
            }),
        }
    }
}

impl DirectionsProvider for OrsClient {
    async fn route(
        &self,
        start: LonLat,
        end: LonLat,
        profile: Profile,
    ) -> Result<Directions, ProviderError> {
        self.directions(start, end, profile)
            .await
            .map_err(|e| ProviderError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = OrsConfig::new("test-key")
            .with_base_url("http://localhost:8080/ors/")
            .with_max_concurrent(10)
            .with_timeouts(5, 15);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080/ors");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.geocode_timeout_secs, 5);
        assert_eq!(config.directions_timeout_secs, 15);
    }

    #[test]
    fn config_defaults() {
        let config = OrsConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.geocode_timeout_secs, 30);
        assert_eq!(config.directions_timeout_secs, 60);
    }

    #[test]
    fn client_creation() {
        assert!(OrsClient::new(OrsConfig::new("test-key")).is_ok());
    }

    #[test]
    fn empty_key_is_not_configured() {
        let result = OrsClient::new(OrsConfig::new("  "));
        assert!(matches!(result, Err(OrsError::NotConfigured(_))));
    }

    #[test]
    fn zero_concurrency_is_not_configured() {
        let result = OrsClient::new(OrsConfig::new("key").with_max_concurrent(0));
        assert!(matches!(result, Err(OrsError::NotConfigured(_))));
    }

    #[test]
    fn key_with_newline_is_rejected() {
        let result = OrsClient::new(OrsConfig::new("bad\nkey"));
        assert!(matches!(result, Err(OrsError::NotConfigured(_))));
    }

    // Calls against the live service need a real API key and network
    // access, so they are not part of this suite.
}
