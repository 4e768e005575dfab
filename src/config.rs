//! Service configuration.
//!
//! Sources are layered, later ones winning:
//! 1. built-in defaults
//! 2. `vcardqr.toml` in the working directory (optional), or an explicit file
//! 3. `VCARDQR_*` environment variables, `__` separating nested keys
//!    (e.g. `VCARDQR_SERVER__PORT=8080`)

use std::net::SocketAddr;
use std::path::Path;

use config::{Config as RawConfig, Environment, File};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::handler::{HandlerConfig, ResponseStyle};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FILE: &str = "vcardqr";
const ENV_PREFIX: &str = "VCARDQR";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Response shape for successful requests.
    #[serde(default)]
    pub style: ResponseStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl AppConfig {
    /// Loads configuration from `.env`, the optional default file and the environment.
    ///
    /// ## Errors
    /// Returns an error if a source cannot be read or the merged values do not deserialize.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_sources(file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Builds the configuration from an optional file and the given environment source.
    ///
    /// With `file` set the file must exist; otherwise `vcardqr.toml` is read if present.
    pub fn from_sources(file: Option<&Path>, environment: Environment) -> Result<Self> {
        let builder = RawConfig::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("style", "server")?;

        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_FILE).required(false)),
        };

        let config = builder
            .add_source(environment.prefix_separator("_").separator("__").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e| {
            Error::Config(config::ConfigError::Message(format!("Invalid address {addr}: {e}")))
        })
    }

    /// Per-request handler settings; rendering options stay at their fixed defaults.
    pub fn handler(&self) -> HandlerConfig {
        HandlerConfig {
            style: self.style,
            ..HandlerConfig::default()
        }
    }
}
