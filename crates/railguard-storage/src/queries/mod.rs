//! Query modules per table group.

pub mod alerts;
pub mod interactions;
pub mod metrics;
