//! Configuration management for the draw engine
//!
//! Settings come from environment variables or a TOML file; command-line
//! flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::draw::DEFAULT_MAX_ATTEMPTS;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Randomized shuffles tried before the exact fallback
    pub max_attempts: usize,

    /// Fixed RNG seed (reproducible draws); entropy-seeded when unset
    pub seed: Option<u64>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl DrawConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let max_attempts = match std::env::var("SANTA_DRAW_MAX_ATTEMPTS") {
            Ok(v) => v
                .parse::<usize>()
                .with_context(|| format!("Invalid SANTA_DRAW_MAX_ATTEMPTS: {v}"))?,
            Err(_) => DEFAULT_MAX_ATTEMPTS,
        };

        let seed = match std::env::var("SANTA_DRAW_SEED") {
            Ok(v) => Some(
                v.parse::<u64>()
                    .with_context(|| format!("Invalid SANTA_DRAW_SEED: {v}"))?,
            ),
            Err(_) => None,
        };

        let level = std::env::var("SANTA_DRAW_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let format =
            std::env::var("SANTA_DRAW_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            max_attempts,
            seed,
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    ///
    /// `max_attempts` may be zero: the randomized pass is skipped and every
    /// draw goes straight to the exact matcher.
    pub fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => anyhow::bail!("log format must be 'text' or 'json', got '{other}'"),
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!("unknown log level '{other}'"),
        }

        Ok(())
    }
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
            logging: LoggingConfig::default(),
        }
    }
}
