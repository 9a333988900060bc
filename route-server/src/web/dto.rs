//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{RoutePath, RouteSource, ScoredRoute, TransportMode};
use crate::history::HistoryRecord;
use crate::planner::{RankWeights, RankedPlan, UnavailableMode};

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Origin place name (e.g., "Kyiv")
    pub origin: String,

    /// Destination place name
    pub destination: String,

    /// Weight of travel time (defaults to server weights)
    pub w_time: Option<f64>,

    /// Weight of price
    pub w_price: Option<f64>,

    /// Weight of transfer count
    pub w_comfort: Option<f64>,
}

impl PlanRequest {
    /// Ranking weights for this request, falling back to `default` per axis.
    pub fn weights(&self, default: RankWeights) -> Result<RankWeights, String> {
        let weights = RankWeights::new(
            self.w_time.unwrap_or(default.time),
            self.w_price.unwrap_or(default.price),
            self.w_comfort.unwrap_or(default.comfort),
        );

        if weights.is_valid() {
            Ok(weights)
        } else {
            Err(format!(
                "Weights must be finite and non-negative, got time={} price={} comfort={}",
                weights.time, weights.price, weights.comfort
            ))
        }
    }
}

/// A ranked route in the plan response.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// 1-based position in the ranking
    pub rank: usize,

    pub mode: TransportMode,

    /// Ranking score, lower is better
    pub score: f64,

    pub time_min: u32,

    /// Human-readable duration (e.g., "2 h 5 min")
    pub duration_display: String,

    pub price: f64,

    pub distance_km: f64,

    /// Human-readable distance (e.g., "467.5 km")
    pub distance_display: String,

    pub transfers: u32,

    pub description: String,

    pub source: RouteSource,

    /// Routed path, only for live directions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<RoutePath>,
}

/// A mode that is missing from the ranking.
#[derive(Debug, Serialize)]
pub struct UnavailableResult {
    pub mode: TransportMode,
    pub reason: String,
}

/// Response to a plan request.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// Origin as queried (trimmed)
    pub origin: String,

    /// Destination as queried (trimmed)
    pub destination: String,

    /// Weights used for the ranking
    pub weights: WeightsResult,

    /// Routes, best first
    pub routes: Vec<RouteResult>,

    /// Modes that could not be built
    pub unavailable: Vec<UnavailableResult>,
}

#[derive(Debug, Serialize)]
pub struct WeightsResult {
    pub time: f64,
    pub price: f64,
    pub comfort: f64,
}

/// Request to list history.
#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    /// Maximum number of records (default 50, max 500)
    pub limit: Option<usize>,
}

/// Response to a history request.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    /// Records, newest first
    pub records: Vec<HistoryRecord>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Format whole minutes as "2 h 5 min", or "45 min" under an hour.
pub fn format_duration(minutes: u32) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    if h > 0 {
        format!("{h} h {m} min")
    } else {
        format!("{m} min")
    }
}

/// Format a distance as "12.3 km", or in metres under one kilometre.
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{km:.1} km")
    }
}

// Conversion implementations

impl RouteResult {
    /// Create from a scored route at a 1-based rank.
    pub fn from_scored(rank: usize, scored: &ScoredRoute) -> Self {
        let route = &scored.route;
        Self {
            rank,
            mode: route.mode,
            score: scored.score,
            time_min: route.time_min,
            duration_display: format_duration(route.time_min),
            price: route.price,
            distance_km: route.distance_km,
            distance_display: format_distance(route.distance_km),
            transfers: route.transfers,
            description: route.description.clone(),
            source: route.source,
            path: route.path.clone(),
        }
    }
}

impl UnavailableResult {
    pub fn from_unavailable(unavailable: &UnavailableMode) -> Self {
        Self {
            mode: unavailable.mode,
            reason: unavailable.error.to_string(),
        }
    }
}

impl PlanResponse {
    /// Create from a ranked plan.
    pub fn from_plan(plan: &RankedPlan, weights: RankWeights) -> Self {
        Self {
            origin: plan.query.origin().to_string(),
            destination: plan.query.destination().to_string(),
            weights: WeightsResult {
                time: weights.time,
                price: weights.price,
                comfort: weights.comfort,
            },
            routes: plan
                .routes
                .iter()
                .enumerate()
                .map(|(i, scored)| RouteResult::from_scored(i + 1, scored))
                .collect(),
            unavailable: plan
                .unavailable
                .iter()
                .map(UnavailableResult::from_unavailable)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LonLat, Route};
    use crate::planner::{Endpoint, RouteError, RouteQuery};

    fn request(w_time: Option<f64>, w_price: Option<f64>, w_comfort: Option<f64>) -> PlanRequest {
        PlanRequest {
            origin: "Kyiv".to_string(),
            destination: "Lviv".to_string(),
            w_time,
            w_price,
            w_comfort,
        }
    }

    fn car_route() -> ScoredRoute {
        let kyiv = LonLat::new(30.5234, 50.4501).unwrap();
        let lviv = LonLat::new(24.0297, 49.8397).unwrap();
        ScoredRoute {
            route: Route {
                mode: TransportMode::Car,
                time_min: 421,
                price: 54.12,
                distance_km: 541.2,
                transfers: 0,
                description: "Kyiv → Lviv".to_string(),
                path: Some(RoutePath {
                    start: kyiv,
                    end: lviv,
                    geometry: vec![kyiv, lviv],
                }),
                source: RouteSource::LiveDirections,
            },
            score: 0.42,
        }
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0 min");
        assert_eq!(format_duration(45), "45 min");
        assert_eq!(format_duration(60), "1 h 0 min");
        assert_eq!(format_duration(125), "2 h 5 min");
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(12.34), "12.3 km");
        assert_eq!(format_distance(467.5), "467.5 km");
        assert_eq!(format_distance(0.8), "800 m");
        assert_eq!(format_distance(1.0), "1.0 km");
    }

    #[test]
    fn weights_default_per_axis() {
        let default = RankWeights::default();

        assert_eq!(request(None, None, None).weights(default).unwrap(), default);

        let weights = request(Some(1.0), None, Some(0.0)).weights(default).unwrap();
        assert_eq!(weights, RankWeights::new(1.0, default.price, 0.0));
    }

    #[test]
    fn invalid_weights_rejected() {
        let default = RankWeights::default();
        assert!(request(Some(-0.1), None, None).weights(default).is_err());
        assert!(request(None, Some(f64::NAN), None).weights(default).is_err());
        assert!(
            request(None, None, Some(f64::INFINITY))
                .weights(default)
                .is_err()
        );
    }

    #[test]
    fn route_result_from_scored() {
        let result = RouteResult::from_scored(1, &car_route());

        assert_eq!(result.rank, 1);
        assert_eq!(result.mode, TransportMode::Car);
        assert_eq!(result.duration_display, "7 h 1 min");
        assert_eq!(result.distance_display, "541.2 km");
        assert_eq!(result.source, RouteSource::LiveDirections);
        assert!(result.path.is_some());
    }

    #[test]
    fn estimated_route_serializes_without_path() {
        let mut scored = car_route();
        scored.route.mode = TransportMode::Plane;
        scored.route.path = None;
        scored.route.source = RouteSource::AviationEstimate;

        let json = serde_json::to_value(RouteResult::from_scored(2, &scored)).unwrap();
        assert_eq!(json["mode"], "plane");
        assert_eq!(json["source"], "aviation_estimate");
        assert!(json.get("path").is_none());
    }

    #[test]
    fn plan_response_numbers_ranks_and_lists_unavailable() {
        let weights = RankWeights::default();
        let plan = RankedPlan {
            query: RouteQuery::new(" Kyiv ", "Lviv").unwrap(),
            routes: vec![car_route(), car_route()],
            unavailable: vec![UnavailableMode {
                mode: TransportMode::Walking,
                error: RouteError::ResolutionFailed {
                    endpoint: Endpoint::Destination,
                    reason: "no match".to_string(),
                },
            }],
        };

        let response = PlanResponse::from_plan(&plan, weights);

        assert_eq!(response.origin, "Kyiv");
        assert_eq!(
            response.routes.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(response.unavailable.len(), 1);
        assert_eq!(response.unavailable[0].mode, TransportMode::Walking);
        assert!(response.unavailable[0].reason.contains("no match"));
    }
}
