//! Domain types for the route planner.
//!
//! Coordinates, transport modes and route records. Types that have
//! invariants enforce them at construction, so code that receives them can
//! trust their validity.

mod coord;
mod error;
mod mode;
mod route;

pub use coord::{EARTH_RADIUS_KM, LonLat, great_circle_km};
pub use error::DomainError;
pub use mode::{Profile, TransportMode};
pub use route::{Route, RoutePath, RouteSource, ScoredRoute};

pub(crate) use route::round_non_negative;
