//! Multi-modal route planner server.
//!
//! Answers "how should I get from A to B?" by building one candidate route
//! per transport mode (live directions for car, bicycle and walking;
//! distance-based estimates for train, bus and plane) and ranking them by
//! a weighted mix of time, price and transfers.

pub mod backend;
pub mod cache;
pub mod config;
pub mod domain;
pub mod history;
pub mod offline;
pub mod ors;
pub mod planner;
pub mod web;
