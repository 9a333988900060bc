//! OpenRouteService client error types.

use crate::domain::DomainError;

/// Errors from the OpenRouteService HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum OrsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// ORS answered with an error payload
    #[error("routing error: {0}")]
    Routing(String),

    /// Directions response had no route
    #[error("no route in directions response")]
    NoFeatures,

    /// Coordinates in the response were out of range
    #[error("invalid coordinate in response: {0}")]
    InvalidCoordinate(#[from] DomainError),

    /// Rate limited by the API
    #[error("rate limited by OpenRouteService")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized: check ORS_API_KEY")]
    Unauthorized,

    /// Client cannot be built from the given configuration
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
