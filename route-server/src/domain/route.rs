//! Route records.
//!
//! A `Route` is one candidate travel option for a single mode. Routes are
//! built fresh for every query and never change afterwards; ranking wraps
//! them in a `ScoredRoute` instead of writing a score back.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LonLat, TransportMode};

/// Which subsystem produced a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    /// Real road/path routing from the directions provider.
    LiveDirections,
    /// Distance-based flight estimate.
    AviationEstimate,
    /// Distance-based rail estimate.
    RailEstimate,
    /// Distance-based coach estimate.
    BusEstimate,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RouteSource::LiveDirections => "live directions",
            RouteSource::AviationEstimate => "aviation estimate",
            RouteSource::RailEstimate => "rail estimate",
            RouteSource::BusEstimate => "bus estimate",
        };
        f.write_str(s)
    }
}

/// The routed path of a live-directions route.
///
/// Start, end and geometry travel together, so a route either has all
/// three or none of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub start: LonLat,
    pub end: LonLat,
    /// Ordered path vertices.
    pub geometry: Vec<LonLat>,
}

/// One candidate travel option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub mode: TransportMode,
    /// Total travel time in whole minutes.
    pub time_min: u32,
    /// Estimated price, non-negative, rounded to two decimals.
    pub price: f64,
    /// Travel distance in kilometres, rounded to one decimal.
    pub distance_km: f64,
    /// Number of connections along the way.
    pub transfers: u32,
    pub description: String,
    /// Present only for routes backed by live directions.
    pub path: Option<RoutePath>,
    pub source: RouteSource,
}

impl Route {
    /// Whether this route carries a drawable path.
    pub fn has_path(&self) -> bool {
        self.path.is_some()
    }
}

/// A route together with its ranking score. Lower is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRoute {
    #[serde(flatten)]
    pub route: Route,
    pub score: f64,
}

/// Round a non-negative amount to `decimals` places, clamping negatives
/// and non-finite values to zero.
pub(crate) fn round_non_negative(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
