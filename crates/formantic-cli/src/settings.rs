//! Synthesis settings: a JSON config file plus command-line overrides.

use anyhow::{Context, Result};
use formantic_synth::SynthConfig;
use std::fs;
use std::path::Path;

/// Flag values that override the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub phone_rate: Option<f64>,
    pub seed: Option<u32>,
    pub sample_rate: Option<u32>,
}

/// Reads a [`SynthConfig`] from a JSON file.
///
/// Missing fields take their defaults; unknown fields are rejected.
pub fn load_config(path: &Path) -> Result<SynthConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Builds the effective configuration and validates it.
pub fn resolve(config_path: Option<&str>, overrides: Overrides) -> Result<SynthConfig> {
    let mut config = match config_path {
        Some(path) => load_config(Path::new(path))?,
        None => SynthConfig::default(),
    };

    if let Some(rate) = overrides.phone_rate {
        config.phone_rate = rate;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }
    if let Some(sample_rate) = overrides.sample_rate {
        config.sample_rate = sample_rate;
    }

    config.validate().context("Invalid synthesis settings")?;
    Ok(config)
}
