//! Resolution of configuration into concrete event subscriptions

pub mod planner;

pub use planner::*;
