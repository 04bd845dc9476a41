//! Service configuration.
//!
//! Every key is optional; a missing file section falls back to the defaults
//! below. Command-line flags override what the file says.
//!
//! ```toml
//! addr = "0.0.0.0:3333"
//! log  = "info,michi=debug"
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED),
    3333,
);

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Listen address.
    pub addr: SocketAddr,
    /// `tracing-subscriber` filter directive, used when `RUST_LOG` is unset.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: DEFAULT_ADDR, log: "info".to_owned() }
    }
}

impl Config {
    /// Loads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
