//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use faultline_config::{Config, HealthConfig, PaginationConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    pagination: PaginationConfig::default(),
                },
                telemetry: None,
            },
        }
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Serve the health check somewhere other than `/health`
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Set list paging limits
    pub fn with_pagination(mut self, default_show_count: u32, max_show_count: u32) -> Self {
        self.config.server.pagination = PaginationConfig {
            default_show_count,
            max_show_count,
        };
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
