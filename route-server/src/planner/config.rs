//! Planner configuration.

use std::time::Duration;

/// Price per kilometre for driving.
pub const DEFAULT_CAR_PRICE_PER_KM: f64 = 0.10;

/// Configuration parameters for route aggregation.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Upper bound on a single place resolution.
    pub geocode_timeout: Duration,

    /// Upper bound on a single directions request.
    pub directions_timeout: Duration,

    /// Price per kilometre for the car mode. Bicycle and walking are free.
    pub car_price_per_km: f64,
}

impl PlannerConfig {
    /// Set the geocoding timeout.
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }

    /// Set the directions timeout.
    pub fn with_directions_timeout(mut self, timeout: Duration) -> Self {
        self.directions_timeout = timeout;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            geocode_timeout: Duration::from_secs(30),
            directions_timeout: Duration::from_secs(60),
            car_price_per_km: DEFAULT_CAR_PRICE_PER_KM,
        }
    }
}

/// Weights for the ranking score.
///
/// Weights need not sum to one; the ranking does not renormalise them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankWeights {
    pub time: f64,
    pub price: f64,
    /// Weight of the transfer count.
    pub comfort: f64,
}

impl RankWeights {
    pub fn new(time: f64, price: f64, comfort: f64) -> Self {
        Self {
            time,
            price,
            comfort,
        }
    }

    /// The score of a route that is worst on every axis.
    pub fn total(&self) -> f64 {
        self.time + self.price + self.comfort
    }

    /// Whether every weight is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.time, self.price, self.comfort]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            time: 0.5,
            price: 0.3,
            comfort: 0.2,
        }
    }
}
