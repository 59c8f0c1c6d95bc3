// src/config/mod.rs
//! Process configuration from the environment (`.env` is loaded by the binary).

use std::env;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::signals::patterns::{DEFAULT_SIGNALS_PATH, ENV_SIGNALS_PATH};

pub const ENV_DATA_DIR: &str = "CEP_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "CEP_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "CEP_LOG_FORMAT";

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl LogFormat {
    /// Unknown values fall back to compact.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub signals_path: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            signals_path: PathBuf::from(DEFAULT_SIGNALS_PATH),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::Compact,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: non_empty_var(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            signals_path: non_empty_var(ENV_SIGNALS_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.signals_path),
            log_level: non_empty_var(ENV_LOG_LEVEL)
                .map(|v| v.trim().to_ascii_lowercase())
                .unwrap_or(defaults.log_level),
            log_format: non_empty_var(ENV_LOG_FORMAT)
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
        }
    }

    /// Global subscriber on stderr. `RUST_LOG` wins over the configured level.
    /// Calling it twice is harmless.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level.as_str()));
        let registry = tracing_subscriber::registry().with(filter);
        let _ = match self.log_format {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init(),
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .try_init(),
        };
    }
}
