//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! The `[policy]` table names a preset and may override any of its
//! fields; everything else falls back to defaults when omitted.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::report::OutputFormat;
use crate::strategy::policy::{DecisionPolicy, PolicyPreset};

/// Config file read when `CASHOUT_CONFIG` isn't set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PolicySection {
    #[serde(default)]
    pub preset: PolicyPreset,
    /// Field-level overrides applied on top of the preset.
    #[serde(flatten)]
    pub overrides: toml::Table,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Also print the decision under every preset.
    #[serde(default)]
    pub compare_presets: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "cashout=warn".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }
}

impl PolicySection {
    /// The preset's policy with overrides applied, validated.
    pub fn resolve(&self) -> Result<DecisionPolicy> {
        let base = self.preset.policy();
        let policy = if self.overrides.is_empty() {
            base
        } else {
            let mut merged = serde_json::to_value(&base).context("Failed to serialise policy")?;
            let overrides =
                serde_json::to_value(&self.overrides).context("Failed to read policy overrides")?;
            if let (Some(target), Some(source)) = (merged.as_object_mut(), overrides.as_object()) {
                for (key, value) in source {
                    anyhow::ensure!(target.contains_key(key), "Unknown policy field: {key}");
                    target.insert(key.clone(), value.clone());
                }
            }
            serde_json::from_value(merged).context("Invalid policy override")?
        };
        policy
            .validate()
            .with_context(|| format!("Invalid policy (preset {})", self.preset))?;
        Ok(policy)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
