//! Application state for the web layer.

use std::sync::Arc;

use crate::backend::Aggregator;
use crate::history::HistoryStore;
use crate::planner::RankWeights;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route aggregator over the configured backend
    pub aggregator: Arc<Aggregator>,

    /// History of ranked queries
    pub history: Arc<HistoryStore>,

    /// Weights used when a request does not override them
    pub weights: RankWeights,
}

impl AppState {
    /// Create a new app state.
    pub fn new(aggregator: Aggregator, history: HistoryStore, weights: RankWeights) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            history: Arc::new(history),
            weights,
        }
    }
}
