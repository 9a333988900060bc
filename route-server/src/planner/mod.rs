//! Route aggregation and ranking.
//!
//! This module answers: "what are my options for getting from A to B, and
//! which one is best for me?"
//!
//! The aggregator builds one candidate per transport mode, using live
//! directions where real routing exists and distance-based estimates
//! elsewhere. The ranking combines time, price and transfers into one
//! weighted score.

mod aggregate;
mod config;
pub mod estimate;
mod provider;
mod rank;

pub use aggregate::{
    Aggregation, Endpoint, ModeOutcome, PlanError, RankedPlan, RouteAggregator, RouteError,
    RouteQuery, UnavailableMode,
};
pub use config::{PlannerConfig, RankWeights};
pub use provider::{
    Directions, DirectionsProvider, GeoResolver, Place, ProviderError, ResolveError,
};
pub use rank::rank_routes;
