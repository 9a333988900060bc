//! Transport modes and routing profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six transport kinds the planner compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Car,
    Bicycle,
    Walking,
    Bus,
    Train,
    Plane,
}

impl TransportMode {
    /// Every mode, in the order candidates are produced.
    pub const ALL: [TransportMode; 6] = [
        TransportMode::Car,
        TransportMode::Bicycle,
        TransportMode::Walking,
        TransportMode::Train,
        TransportMode::Bus,
        TransportMode::Plane,
    ];

    /// The routing profile for modes backed by live directions.
    ///
    /// Returns `None` for heuristic modes (bus, train, plane).
    pub fn profile(self) -> Option<Profile> {
        match self {
            TransportMode::Car => Some(Profile::DrivingCar),
            TransportMode::Bicycle => Some(Profile::CyclingRegular),
            TransportMode::Walking => Some(Profile::FootWalking),
            TransportMode::Bus | TransportMode::Train | TransportMode::Plane => None,
        }
    }

    /// Whether the mode's metrics come from an analytic estimate.
    pub fn is_heuristic(self) -> bool {
        self.profile().is_none()
    }

    /// Lowercase identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bicycle => "bicycle",
            TransportMode::Walking => "walking",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Plane => "plane",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directions provider's identifier for a travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    DrivingCar,
    CyclingRegular,
    FootWalking,
}

impl Profile {
    /// The identifier used in provider URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::DrivingCar => "driving-car",
            Profile::CyclingRegular => "cycling-regular",
            Profile::FootWalking => "foot-walking",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
