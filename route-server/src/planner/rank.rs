//! Route ranking.
//!
//! Normalises time, price and transfer count against the worst candidate
//! on each axis and combines them into one weighted score.

use crate::domain::{Route, ScoredRoute};

use super::config::RankWeights;

/// Rank routes by weighted score, best first.
///
/// For each route:
///
/// ```text
/// score = w.time    * time_min  / max(time_min)
///       + w.price   * price     / max(price)
///       + w.comfort * transfers / max(transfers)
/// ```
///
/// A maximum of zero is replaced by one. A route optimal on every axis
/// scores 0; the worst route on every axis scores `w.total()`. A lone
/// route is the maximum on every axis, so it scores `w.total()` unless one
/// of its metrics is zero.
///
/// The sort is stable and has no secondary key: routes with equal scores
/// keep their input order. Inputs are not modified.
pub fn rank_routes(routes: &[Route], weights: RankWeights) -> Vec<ScoredRoute> {
    if routes.is_empty() {
        return Vec::new();
    }

    let max_time = axis_max(routes.iter().map(|r| f64::from(r.time_min)));
    let max_price = axis_max(routes.iter().map(|r| r.price));
    let max_transfers = axis_max(routes.iter().map(|r| f64::from(r.transfers)));

    let mut scored: Vec<ScoredRoute> = routes
        .iter()
        .map(|route| {
            let score = weights.time * (f64::from(route.time_min) / max_time)
                + weights.price * (route.price / max_price)
                + weights.comfort * (f64::from(route.transfers) / max_transfers);
            ScoredRoute {
                route: route.clone(),
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored
}

/// Largest value on one axis, with zero replaced by one.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0, f64::max);
    if max > 0.0 { max } else { 1.0 }
}
