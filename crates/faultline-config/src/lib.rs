#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod pagination;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use health::*;
pub use pagination::*;
pub use server::*;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level Faultline configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
