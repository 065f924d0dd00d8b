//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use beo_config::{Config, CorsConfig, GeminiConfig, HealthConfig, ServerConfig};
use secrecy::SecretString;

/// Model name the mock Gemini backend answers for
pub const TEST_MODEL: &str = "gemini-test";

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
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                gemini: GeminiConfig {
                    model: TEST_MODEL.to_owned(),
                    ..GeminiConfig::default()
                },
                telemetry: None,
            },
        }
    }

    /// Point the Gemini gateway at a mock backend
    pub fn with_gemini(mut self, base_url: &str) -> Self {
        self.config.gemini.api_key = Some(SecretString::from("test-key"));
        self.config.gemini.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Limit request bodies
    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.config.server.max_body_size = bytes;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
