//! Shared service helpers; currently only the telemetry wiring.

pub mod telemetry;

pub use telemetry::*;
