//! Configuration for quote comparison
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, else the user override (~/.config/quotecmp/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Environment variables are applied on top:
//! - `QUOTECMP_MIN_FILES`: minimum documents per batch
//! - `QUOTECMP_MAX_CONCURRENCY`: extractions in flight per batch
//! - `QUOTECMP_EXTRACTOR`: extraction backend (replay, mock)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/quotecmp.toml");

/// Batch policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Batches with fewer documents are rejected before comparison
    pub min_files: usize,
    /// Extractions running at once within one batch
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_files: 2,
            max_concurrency: 4,
        }
    }
}

/// Extraction backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub backend: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            backend: "replay".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    pub batch: BatchConfig,
    pub extraction: ExtractionConfig,
}

impl QuoteConfig {
    /// Load configuration (override file first, then defaults, then env)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = load_file(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: QuoteConfig = toml::from_str(content)?;
        config.sanitize();
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("QUOTECMP_MIN_FILES") {
            match value.parse() {
                Ok(n) => self.batch.min_files = n,
                Err(_) => warn!(value = %value, "Ignoring invalid QUOTECMP_MIN_FILES"),
            }
        }
        if let Some(value) = lookup("QUOTECMP_MAX_CONCURRENCY") {
            match value.parse() {
                Ok(n) => self.batch.max_concurrency = n,
                Err(_) => warn!(value = %value, "Ignoring invalid QUOTECMP_MAX_CONCURRENCY"),
            }
        }
        if let Some(value) = lookup("QUOTECMP_EXTRACTOR") {
            self.extraction.backend = value;
        }
        self.sanitize();
    }

    fn sanitize(&mut self) {
        self.batch.max_concurrency = self.batch.max_concurrency.max(1);
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quotecmp").join("config.toml"))
}

/// Read the override file if present, else the embedded defaults
fn load_file(override_path: Option<&Path>) -> Result<QuoteConfig> {
    let path = match override_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::NotFound(format!("Config file {}", path.display())));
            }
            Some(path.to_path_buf())
        }
        None => default_config_path().filter(|p| p.exists()),
    };

    match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading config override");
            let content = fs::read_to_string(&path)?;
            QuoteConfig::from_toml(&content)
        }
        None => QuoteConfig::from_toml(DEFAULT_CONFIG),
    }
}
