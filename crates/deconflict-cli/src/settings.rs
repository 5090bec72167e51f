//! Deconfliction settings from file, environment, and command line.
//!
//! Later layers win: settings file, then `DECONFLICT_*` environment
//! variables, then flags.

use anyhow::{Context, Result};
use clap::Args;
use deconflict_core::rules::{
    DEFAULT_RESOLUTION_M, DEFAULT_SAFETY_BUFFER_M, DEFAULT_TIME_THRESHOLD_S,
};
use deconflict_core::DetectionRules;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.json";
pub const DEFAULT_CLUSTER_GAP_S: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub safety_buffer: f64,
    pub time_threshold: f64,
    pub resolution: f64,
    /// Max time gap between conflict records folded into one encounter
    pub cluster_gap_s: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            safety_buffer: DEFAULT_SAFETY_BUFFER_M,
            time_threshold: DEFAULT_TIME_THRESHOLD_S,
            resolution: DEFAULT_RESOLUTION_M,
            cluster_gap_s: DEFAULT_CLUSTER_GAP_S,
        }
    }
}

/// Command-line overrides for the detection thresholds.
#[derive(Debug, Clone, Default, Args)]
pub struct RuleOverrides {
    /// Minimum separation in meters
    #[arg(long)]
    pub safety_buffer: Option<f64>,

    /// Max timestamp gap in seconds for samples to count as simultaneous
    #[arg(long)]
    pub time_threshold: Option<f64>,

    /// Trajectory sample spacing in meters
    #[arg(long)]
    pub resolution: Option<f64>,

    /// Max gap in seconds between records of one encounter
    #[arg(long)]
    pub cluster_gap: Option<f64>,
}

impl Settings {
    /// Load settings from a JSON file. Unknown keys are ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing settings file {}", path.display()))
    }

    /// Apply all three layers and validate the result.
    ///
    /// Without an explicit path, `config/settings.json` is used if it exists.
    pub fn resolve(config: Option<&Path>, overrides: &RuleOverrides) -> Result<Self> {
        let mut settings = Self::load(config)?;
        settings.apply_overrides(overrides);
        settings.detection_rules().validate()?;
        Ok(settings)
    }

    /// File and environment layers only, unvalidated. Callers that need a
    /// single value validate it themselves.
    pub fn load(config: Option<&Path>) -> Result<Self> {
        let path = match config {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_SETTINGS_PATH)).filter(|p| p.exists()),
        };

        let mut settings = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading settings file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        settings.apply_env(|key| env::var(key).ok());
        Ok(settings)
    }

    /// Apply `DECONFLICT_*` variables; unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).and_then(|s| s.trim().parse::<f64>().ok());

        if let Some(value) = read("DECONFLICT_SAFETY_BUFFER") {
            self.safety_buffer = value;
        }
        if let Some(value) = read("DECONFLICT_TIME_THRESHOLD") {
            self.time_threshold = value;
        }
        if let Some(value) = read("DECONFLICT_RESOLUTION") {
            self.resolution = value;
        }
        if let Some(value) = read("DECONFLICT_CLUSTER_GAP_S") {
            self.cluster_gap_s = value;
        }
    }

    pub fn apply_overrides(&mut self, overrides: &RuleOverrides) {
        if let Some(value) = overrides.safety_buffer {
            self.safety_buffer = value;
        }
        if let Some(value) = overrides.time_threshold {
            self.time_threshold = value;
        }
        if let Some(value) = overrides.resolution {
            self.resolution = value;
        }
        if let Some(value) = overrides.cluster_gap {
            self.cluster_gap_s = value;
        }
    }

    pub fn detection_rules(&self) -> DetectionRules {
        DetectionRules {
            safety_buffer: self.safety_buffer,
            time_threshold: self.time_threshold,
            resolution: self.resolution,
        }
    }
}
