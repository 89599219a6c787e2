use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use xenotic_engine::config::Validate;
use xenotic_engine::logger::LogLevel;
use xenotic_engine::{ConfigError, RegistrySettings};

pub const DEFAULT_CONFIG_PATH: &str = "xenotic_server.yaml";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Directory served for every path outside `/api`.
    pub static_files_path: Option<PathBuf>,
    pub log_level: LogLevel,
    pub registry: RegistrySettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            static_files_path: None,
            log_level: LogLevel::default(),
            registry: RegistrySettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::Invalid(format!("bad bind_address '{}': {}", self.bind_address, e))
        })
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        self.registry.validate()
    }
}
