//! Configuration types for hello-service.
//!
//! The only knobs are where the server binds and how it logs. Settings come
//! from an optional TOML file (path in `HELLO_CONFIG`), then `HELLO_HOST` /
//! `HELLO_PORT` override the bind address. The result is validated before the
//! server opens a port; an invalid value is an error, never a silent default.
//!
//! # Example
//! ```toml
//! [server]
//! host       = "127.0.0.1"
//! port       = 8000
//! log_level  = "hello_service=debug,tower_http=info"
//! log_format = "json"
//! ```

use std::{
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Self = toml::from_str(&content).context("parsing config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Build the runtime config from the process environment.
    ///
    /// Reads the file named by `HELLO_CONFIG` when set (defaults otherwise),
    /// then applies `HELLO_HOST` and `HELLO_PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match std::env::var_os("HELLO_CONFIG") {
            Some(path) => {
                let path = PathBuf::from(path);
                Self::load(&path)
                    .with_context(|| format!("loading config from {}", path.display()))?
            }
            None => Self::default(),
        };

        config.apply_overrides(
            std::env::var("HELLO_HOST").ok(),
            std::env::var("HELLO_PORT").ok(),
        )?;
        config.validate()?;
        Ok(config)
    }

    /// Empty values are treated as unset.
    fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) -> anyhow::Result<()> {
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            self.server.host = host;
        }
        if let Some(port) = port.filter(|p| !p.is_empty()) {
            self.server.port = port
                .parse()
                .with_context(|| format!("HELLO_PORT `{port}` is not a valid port number"))?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.server.addr()?;
        self.server.env_filter()?;
        Ok(())
    }
}

/// Listener and logging settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: `0.0.0.0`).
    #[serde(default = "defaults::host")]
    pub host: String,

    /// TCP port to bind (default: 8000).
    #[serde(default = "defaults::port")]
    pub port: u16,

    /// Tracing filter directive. `RUST_LOG` takes precedence when set.
    #[serde(default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Socket address the listener binds to.
    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("server.host `{}` is not an IP address", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Tracing filter from `log_level`, or the built-in default when unset.
    ///
    /// Unparseable directives are an error rather than being dropped.
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        match self.log_level.as_deref() {
            Some(level) => EnvFilter::try_new(level)
                .with_context(|| format!("server.log_level `{level}` is not a valid filter")),
            None => Ok(EnvFilter::new(defaults::LOG_FILTER)),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::host(),
            port: defaults::port(),
            log_level: None,
            log_format: LogFormat::default(),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

mod defaults {
    pub fn host() -> String { "0.0.0.0".into() }
    pub fn port() -> u16 { 8000 }

    pub const LOG_FILTER: &str = "hello_service=info,tower_http=info";
}
