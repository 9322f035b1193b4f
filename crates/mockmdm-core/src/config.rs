//! Process configuration from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DEVICE_FILE: &str = "devices.yaml";

/// Top-level server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdmConfig {
    /// Interface the HTTP listener binds to.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// YAML dataset re-read on every device query.
    pub device_file: PathBuf,
}

impl Default for MdmConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            device_file: PathBuf::from(DEFAULT_DEVICE_FILE),
        }
    }
}

impl MdmConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("MOCKMDM_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let device_file = lookup("MOCKMDM_DEVICE_FILE")
            .filter(|f| !f.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE_FILE));

        Self {
            host,
            port,
            device_file,
        }
    }

    /// Address string handed to the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
