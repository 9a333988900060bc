//! Distance-based estimates for modes without live routing.
//!
//! These are coarse physical and economic models, not timetables. The
//! constants define how bus, train and plane compare against each other
//! and against the live modes, so they are kept exactly as listed here.

use crate::domain::{RouteSource, TransportMode, round_non_negative};

/// Plane cruise speed, km/h.
pub const PLANE_SPEED_KMH: f64 = 700.0;
/// Fixed ground time for a flight (check-in, boarding, transfers), minutes.
pub const PLANE_OVERHEAD_MIN: u32 = 90;
pub const PLANE_PRICE_PER_KM: f64 = 0.12;

pub const TRAIN_SPEED_KMH: f64 = 130.0;
pub const TRAIN_PRICE_PER_KM: f64 = 0.08;
/// Train trips at or beyond this distance assume one connection.
pub const TRAIN_TRANSFER_THRESHOLD_KM: f64 = 600.0;

pub const BUS_SPEED_KMH: f64 = 80.0;
pub const BUS_PRICE_PER_KM: f64 = 0.05;

/// Metrics for a heuristic mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub time_min: u32,
    pub price: f64,
    pub transfers: u32,
    pub description: &'static str,
    pub source: RouteSource,
}

/// Estimate a heuristic mode over great-circle distance `distance_km`.
///
/// Returns `None` for modes that use live directions instead.
pub fn estimate(mode: TransportMode, distance_km: f64) -> Option<Estimate> {
    let estimate = match mode {
        TransportMode::Plane => plane(distance_km),
        TransportMode::Train => train(distance_km),
        TransportMode::Bus => bus(distance_km),
        TransportMode::Car | TransportMode::Bicycle | TransportMode::Walking => return None,
    };
    Some(estimate)
}

/// Direct flight: cruise time plus ground overhead.
pub fn plane(distance_km: f64) -> Estimate {
    Estimate {
        time_min: travel_minutes(distance_km, PLANE_SPEED_KMH) + PLANE_OVERHEAD_MIN,
        price: round_non_negative(distance_km * PLANE_PRICE_PER_KM, 2),
        transfers: 0,
        description: "Direct flight",
        source: RouteSource::AviationEstimate,
    }
}

pub fn train(distance_km: f64) -> Estimate {
    let transfers = if distance_km >= TRAIN_TRANSFER_THRESHOLD_KM {
        1
    } else {
        0
    };

    Estimate {
        time_min: travel_minutes(distance_km, TRAIN_SPEED_KMH),
        price: round_non_negative(distance_km * TRAIN_PRICE_PER_KM, 2),
        transfers,
        description: if transfers == 0 {
            "Direct train"
        } else {
            "Train with one connection"
        },
        source: RouteSource::RailEstimate,
    }
}

/// Coach trips are always modelled with one connection.
pub fn bus(distance_km: f64) -> Estimate {
    Estimate {
        time_min: travel_minutes(distance_km, BUS_SPEED_KMH),
        price: round_non_negative(distance_km * BUS_PRICE_PER_KM, 2),
        transfers: 1,
        description: "Bus with one connection",
        source: RouteSource::BusEstimate,
    }
}

/// Minutes to cover `distance_km` at `speed_kmh`, rounded to the nearest minute.
fn travel_minutes(distance_km: f64, speed_kmh: f64) -> u32 {
    let minutes = (distance_km / speed_kmh * 60.0).round();
    if minutes.is_finite() && minutes > 0.0 {
        minutes as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_collapses_to_overhead() {
        let p = plane(0.0);
        assert_eq!(p.time_min, 90);
        assert_eq!(p.price, 0.0);
        assert_eq!(p.transfers, 0);

        let t = train(0.0);
        assert_eq!(t.time_min, 0);
        assert_eq!(t.price, 0.0);
        assert_eq!(t.transfers, 0);

        let b = bus(0.0);
        assert_eq!(b.time_min, 0);
        assert_eq!(b.price, 0.0);
        assert_eq!(b.transfers, 1);
    }

    #[test]
    fn train_transfer_threshold() {
        assert_eq!(train(650.0).transfers, 1);
        assert_eq!(train(600.0).transfers, 1);
        assert_eq!(train(599.0).transfers, 0);
        assert_eq!(train(599.0).description, "Direct train");
        assert_eq!(train(650.0).description, "Train with one connection");
    }

    #[test]
    fn plane_formula() {
        // 700 km → 60 min cruise + 90 min overhead
        let p = plane(700.0);
        assert_eq!(p.time_min, 150);
        assert_eq!(p.price, 84.0);

        // 467.53 km → 40.07 min → 40 + 90
        let p = plane(467.53);
        assert_eq!(p.time_min, 130);
        assert_eq!(p.price, 56.1);
    }

    #[test]
    fn train_formula() {
        // 130 km/h → 650 km in 300 min
        let t = train(650.0);
        assert_eq!(t.time_min, 300);
        assert_eq!(t.price, 52.0);

        // 467.53 km → 215.78 min → 216
        assert_eq!(train(467.53).time_min, 216);
        assert_eq!(train(467.53).price, 37.4);
    }

    #[test]
    fn bus_formula() {
        // 80 km/h → 400 km in 300 min
        let b = bus(400.0);
        assert_eq!(b.time_min, 300);
        assert_eq!(b.price, 20.0);
        assert_eq!(b.transfers, 1);

        // 467.53 km → 350.65 min → 351
        assert_eq!(bus(467.53).time_min, 351);
        assert_eq!(bus(467.53).price, 23.38);
    }

    #[test]
    fn sources() {
        assert_eq!(plane(1.0).source, RouteSource::AviationEstimate);
        assert_eq!(train(1.0).source, RouteSource::RailEstimate);
        assert_eq!(bus(1.0).source, RouteSource::BusEstimate);
    }

    #[test]
    fn live_modes_are_not_estimated() {
        assert!(estimate(TransportMode::Car, 100.0).is_none());
        assert!(estimate(TransportMode::Bicycle, 100.0).is_none());
        assert!(estimate(TransportMode::Walking, 100.0).is_none());
        assert_eq!(estimate(TransportMode::Bus, 100.0), Some(bus(100.0)));
    }
}
