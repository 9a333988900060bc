//! Route aggregation.
//!
//! Builds one candidate per transport mode for an (origin, destination)
//! pair. Live modes ask the directions provider; heuristic modes estimate
//! from great-circle distance. The six builds run concurrently and fail
//! independently: a mode that cannot be built is reported as unavailable
//! instead of sinking the whole query.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    Profile, Route, RoutePath, RouteSource, ScoredRoute, TransportMode, great_circle_km,
    round_non_negative,
};

use super::config::{PlannerConfig, RankWeights};
use super::estimate::{self, Estimate};
use super::provider::{DirectionsProvider, GeoResolver, Place};
use super::rank::rank_routes;

/// Which end of the trip failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Origin,
    Destination,
    Both,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Endpoint::Origin => "origin",
            Endpoint::Destination => "destination",
            Endpoint::Both => "origin and destination",
        };
        f.write_str(s)
    }
}

/// Why a single mode could not be built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// An endpoint could not be geocoded
    #[error("could not resolve {endpoint}: {reason}")]
    ResolutionFailed { endpoint: Endpoint, reason: String },

    /// The directions provider failed or returned an unusable payload
    #[error("directions unavailable: {reason}")]
    ProviderUnavailable { reason: String },

    /// The directions provider did not answer in time
    #[error("directions request timed out after {}s", .after.as_secs_f64())]
    Timeout { after: Duration },
}

/// Error that fails a whole query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// The query itself is malformed
    #[error("invalid query: {0}")]
    InvalidQuery(&'static str),

    /// Neither endpoint could be resolved, so no mode can be built
    #[error("could not find either \"{origin}\" or \"{destination}\"")]
    EndpointsUnresolved { origin: String, destination: String },
}

/// An origin/destination pair as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    origin: String,
    destination: String,
}

impl RouteQuery {
    /// Create a query, trimming whitespace and rejecting empty places.
    pub fn new(origin: &str, destination: &str) -> Result<Self, PlanError> {
        let origin = origin.trim();
        let destination = destination.trim();

        if origin.is_empty() {
            return Err(PlanError::InvalidQuery("origin is empty"));
        }
        if destination.is_empty() {
            return Err(PlanError::InvalidQuery("destination is empty"));
        }

        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }
}

/// The result of building one mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeOutcome {
    Available(Route),
    Unavailable { mode: TransportMode, error: RouteError },
}

impl ModeOutcome {
    pub fn mode(&self) -> TransportMode {
        match self {
            ModeOutcome::Available(route) => route.mode,
            ModeOutcome::Unavailable { mode, .. } => *mode,
        }
    }

    pub fn route(&self) -> Option<&Route> {
        match self {
            ModeOutcome::Available(route) => Some(route),
            ModeOutcome::Unavailable { .. } => None,
        }
    }
}

/// A mode that was dropped from the candidate set, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct UnavailableMode {
    pub mode: TransportMode,
    pub error: RouteError,
}

impl fmt::Display for UnavailableMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unavailable: {}", self.mode, self.error)
    }
}

/// One outcome per mode, in [`TransportMode::ALL`] order.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub query: RouteQuery,
    pub outcomes: Vec<ModeOutcome>,
}

impl Aggregation {
    /// The successfully built routes, in mode order.
    pub fn routes(&self) -> Vec<Route> {
        self.outcomes
            .iter()
            .filter_map(ModeOutcome::route)
            .cloned()
            .collect()
    }

    /// The modes that could not be built.
    pub fn unavailable(&self) -> Vec<UnavailableMode> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                ModeOutcome::Available(_) => None,
                ModeOutcome::Unavailable { mode, error } => Some(UnavailableMode {
                    mode: *mode,
                    error: error.clone(),
                }),
            })
            .collect()
    }

    /// Rank the available routes.
    pub fn rank(&self, weights: RankWeights) -> RankedPlan {
        RankedPlan {
            query: self.query.clone(),
            routes: rank_routes(&self.routes(), weights),
            unavailable: self.unavailable(),
        }
    }
}

/// Ranked routes for a query, best first, plus the modes left out.
#[derive(Debug, Clone)]
pub struct RankedPlan {
    pub query: RouteQuery,
    pub routes: Vec<ScoredRoute>,
    pub unavailable: Vec<UnavailableMode>,
}

/// Builds the full candidate set for a query.
pub struct RouteAggregator<G, D> {
    geo: G,
    directions: D,
    config: PlannerConfig,
}

impl<G: GeoResolver, D: DirectionsProvider> RouteAggregator<G, D> {
    pub fn new(geo: G, directions: D, config: PlannerConfig) -> Self {
        Self {
            geo,
            directions,
            config,
        }
    }

    /// Build one outcome per mode.
    ///
    /// Modes are built concurrently and joined before returning. Dropping
    /// the returned future cancels every in-flight request.
    ///
    /// Fails only when neither endpoint resolved for any mode.
    pub async fn build_all_routes(&self, query: &RouteQuery) -> Result<Aggregation, PlanError> {
        let builds = TransportMode::ALL.into_iter().map(|mode| async move {
            match self.build_route(mode, query).await {
                Ok(route) => {
                    debug!(%mode, time_min = route.time_min, price = route.price, "Built route");
                    ModeOutcome::Available(route)
                }
                Err(error) => {
                    warn!(
                        %mode,
                        origin = query.origin(),
                        destination = query.destination(),
                        %error,
                        "Mode unavailable"
                    );
                    ModeOutcome::Unavailable { mode, error }
                }
            }
        });

        let outcomes = join_all(builds).await;

        // Every mode resolves on its own, so an endpoint counts as unresolved
        // only if no mode managed to resolve it
        let neither_resolved = outcomes.iter().all(|o| {
            matches!(
                o,
                ModeOutcome::Unavailable {
                    error: RouteError::ResolutionFailed {
                        endpoint: Endpoint::Both,
                        ..
                    },
                    ..
                }
            )
        });
        if neither_resolved {
            return Err(PlanError::EndpointsUnresolved {
                origin: query.origin().to_string(),
                destination: query.destination().to_string(),
            });
        }

        info!(
            origin = query.origin(),
            destination = query.destination(),
            available = outcomes.iter().filter(|o| o.route().is_some()).count(),
            "Aggregated routes"
        );

        Ok(Aggregation {
            query: query.clone(),
            outcomes,
        })
    }

    /// Build and rank routes for a query.
    pub async fn plan(
        &self,
        query: &RouteQuery,
        weights: RankWeights,
    ) -> Result<RankedPlan, PlanError> {
        Ok(self.build_all_routes(query).await?.rank(weights))
    }

    /// Build the route for a single mode.
    pub async fn build_route(
        &self,
        mode: TransportMode,
        query: &RouteQuery,
    ) -> Result<Route, RouteError> {
        let (from, to) = self.resolve_endpoints(query).await?;

        if let Some(profile) = mode.profile() {
            return self.live_route(mode, profile, &from, &to).await;
        }

        let distance_km = great_circle_km(from.location, to.location);
        match estimate::estimate(mode, distance_km) {
            Some(estimate) => Ok(estimated_route(mode, distance_km, estimate)),
            None => Err(RouteError::ProviderUnavailable {
                reason: format!("no estimator for {mode}"),
            }),
        }
    }

    /// Resolve both endpoints concurrently, reporting which ones failed.
    async fn resolve_endpoints(&self, query: &RouteQuery) -> Result<(Place, Place), RouteError> {
        let (origin, destination) = tokio::join!(
            self.resolve(query.origin()),
            self.resolve(query.destination())
        );

        match (origin, destination) {
            (Ok(from), Ok(to)) => Ok((from, to)),
            (Err(reason), Ok(_)) => Err(RouteError::ResolutionFailed {
                endpoint: Endpoint::Origin,
                reason,
            }),
            (Ok(_), Err(reason)) => Err(RouteError::ResolutionFailed {
                endpoint: Endpoint::Destination,
                reason,
            }),
            (Err(origin), Err(destination)) => Err(RouteError::ResolutionFailed {
                endpoint: Endpoint::Both,
                reason: format!("{origin}; {destination}"),
            }),
        }
    }

    async fn resolve(&self, place: &str) -> Result<Place, String> {
        match with_timeout(self.config.geocode_timeout, self.geo.resolve(place)).await {
            Some(Ok(resolved)) => Ok(resolved),
            Some(Err(e)) => Err(e.to_string()),
            None => Err(format!(
                "geocoding \"{place}\" timed out after {}s",
                self.config.geocode_timeout.as_secs_f64()
            )),
        }
    }

    async fn live_route(
        &self,
        mode: TransportMode,
        profile: Profile,
        from: &Place,
        to: &Place,
    ) -> Result<Route, RouteError> {
        let timeout = self.config.directions_timeout;
        let directions = with_timeout(
            timeout,
            self.directions.route(from.location, to.location, profile),
        )
        .await
        .ok_or(RouteError::Timeout { after: timeout })?
        .map_err(|e| RouteError::ProviderUnavailable {
            reason: e.to_string(),
        })?;

        if !directions.distance_m.is_finite() || directions.distance_m < 0.0 {
            return Err(RouteError::ProviderUnavailable {
                reason: format!("invalid distance {}", directions.distance_m),
            });
        }
        if !directions.duration_s.is_finite() || directions.duration_s < 0.0 {
            return Err(RouteError::ProviderUnavailable {
                reason: format!("invalid duration {}", directions.duration_s),
            });
        }

        let distance_km = directions.distance_m / 1000.0;
        let price_per_km = match mode {
            TransportMode::Car => self.config.car_price_per_km,
            _ => 0.0,
        };

        Ok(Route {
            mode,
            time_min: (directions.duration_s / 60.0).floor() as u32,
            price: round_non_negative(distance_km * price_per_km, 2),
            distance_km: round_non_negative(distance_km, 1),
            transfers: 0,
            description: format!("{} → {}", from.label, to.label),
            path: Some(RoutePath {
                start: from.location,
                end: to.location,
                geometry: directions.geometry,
            }),
            source: RouteSource::LiveDirections,
        })
    }
}

/// Build a heuristic-mode route over great-circle distance `distance_km`.
fn estimated_route(mode: TransportMode, distance_km: f64, estimate: Estimate) -> Route {
    Route {
        mode,
        time_min: estimate.time_min,
        price: estimate.price,
        distance_km: round_non_negative(distance_km, 1),
        transfers: estimate.transfers,
        description: estimate.description.to_string(),
        path: None,
        source: estimate.source,
    }
}

/// Run `fut` with a deadline; `None` on timeout.
async fn with_timeout<T>(limit: Duration, fut: impl Future<Output = T>) -> Option<T> {
    tokio::time::timeout(limit, fut).await.ok()
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
