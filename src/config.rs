//! Service Configuration
//!
//! Runtime configuration for the quota service. Values come from the
//! environment with CLI flags layered on top by `main`; malformed
//! environment values fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 8080;
/// Default units each key may consume per window
pub const DEFAULT_LIMIT_UNITS: u64 = 100;
/// Default window length (one hour)
pub const DEFAULT_WINDOW_MS: u64 = 60 * 60 * 1000;

/// Quota service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub port: u16,

    /// Units each key may consume per window
    pub limit_units: u64,

    /// Window length in milliseconds
    pub window_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            limit_units: DEFAULT_LIMIT_UNITS,
            window_ms: DEFAULT_WINDOW_MS,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("QUOTAD_PORT") {
            if let Ok(port) = val.parse() {
                config.port = port;
            }
        }

        if let Ok(val) = std::env::var("QUOTAD_LIMIT_UNITS") {
            if let Ok(limit) = val.parse() {
                config.limit_units = limit;
            }
        }

        if let Ok(val) = std::env::var("QUOTAD_WINDOW_MS") {
            if let Ok(window) = val.parse() {
                config.window_ms = window;
            }
        }

        config
    }
}
