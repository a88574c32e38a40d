//! Configuration management for Mirador Server

use serde::Deserialize;
use std::env;

/// Remote document re-served by the proxy
pub const DEFAULT_PDF_URL: &str =
    "https://www.lanube360.com/pdf/mirador-los-volcanes-panguipulli.pdf";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Fixed PDF resource fetched on every proxy call
    pub pdf_url: String,
    /// Per-request timeout for the upstream fetch
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            upstream: UpstreamConfig {
                pdf_url: DEFAULT_PDF_URL.to_string(),
                timeout_secs: 30,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT", raw))?,
            Err(_) => 3000,
        };

        let timeout_secs = match env::var("PDF_UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("PDF_UPSTREAM_TIMEOUT_SECS", raw))?,
            Err(_) => 30,
        };

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            upstream: UpstreamConfig {
                pdf_url: env::var("PDF_UPSTREAM_URL").unwrap_or_else(|_| DEFAULT_PDF_URL.to_string()),
                timeout_secs,
            },
        })
    }
}

/// Errors raised while reading configuration from the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
