//! Configuration module for the mock banking backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::ErrorStyle;

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log line layout
    pub log_format: LogFormat,
    /// Flat file holding the current password; memory only when unset
    pub password_file: Option<PathBuf>,
    /// Error envelope used by this deployment
    pub error_style: ErrorStyle,
    /// Gate the `/api` portal routes on the session headers as well
    pub portal_requires_headers: bool,
}

/// Invalid configuration value.
#[derive(Debug)]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value for {}: {:?}", self.variable, self.value)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_addr =
            env::var("MOCKBANK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5003".to_string());
        let bind_addr = raw_addr.parse().map_err(|_| ConfigError {
            variable: "MOCKBANK_BIND_ADDR",
            value: raw_addr.clone(),
        })?;

        let log_level = env::var("MOCKBANK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let raw_format = env::var("MOCKBANK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
        let log_format = parse_log_format(&raw_format).ok_or(ConfigError {
            variable: "MOCKBANK_LOG_FORMAT",
            value: raw_format.clone(),
        })?;

        let password_file = env::var("MOCKBANK_PASSWORD_FILE")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let raw_style = env::var("MOCKBANK_ERROR_STYLE").unwrap_or_else(|_| "coded".to_string());
        let error_style = ErrorStyle::parse(&raw_style).ok_or(ConfigError {
            variable: "MOCKBANK_ERROR_STYLE",
            value: raw_style.clone(),
        })?;

        let raw_gate =
            env::var("MOCKBANK_PORTAL_REQUIRE_HEADERS").unwrap_or_else(|_| "false".to_string());
        let portal_requires_headers = parse_flag(&raw_gate).ok_or(ConfigError {
            variable: "MOCKBANK_PORTAL_REQUIRE_HEADERS",
            value: raw_gate.clone(),
        })?;

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            password_file,
            error_style,
            portal_requires_headers,
        })
    }
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
