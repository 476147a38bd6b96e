//! Domain-level building blocks shared by the explorer client, the CLI and
//! the HTTP API.
//!
//! Nothing in here touches the network: the crate owns the data model that
//! flows through an interaction check, the fixed receiver address, the
//! environment contract and the telemetry bootstrap.

pub mod config;
pub mod model;
pub mod services;

pub use config::{ApiConfig, ConfigError, ExplorerConfig};
pub use model::*;
pub use services::telemetry::{init_telemetry, TelemetryConfig, TelemetryError, TelemetryGuard};
