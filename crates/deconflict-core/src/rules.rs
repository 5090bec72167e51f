//! Detection thresholds for the deconfliction engine.

use crate::error::{DeconflictError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAFETY_BUFFER_M: f64 = 10.0;
pub const DEFAULT_TIME_THRESHOLD_S: f64 = 1.0;
pub const DEFAULT_RESOLUTION_M: f64 = 0.1;

/// Configuration for conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionRules {
    /// Minimum allowed separation in meters (strict: closer than this conflicts)
    pub safety_buffer: f64,
    /// Maximum timestamp gap in seconds for two samples to count as simultaneous
    #[serde(default = "default_time_threshold")]
    pub time_threshold: f64,
    /// Target spacing between trajectory samples in meters
    #[serde(default = "default_resolution")]
    pub resolution: f64,
}

fn default_time_threshold() -> f64 {
    DEFAULT_TIME_THRESHOLD_S
}

fn default_resolution() -> f64 {
    DEFAULT_RESOLUTION_M
}

impl Default for DetectionRules {
    fn default() -> Self {
        Self {
            safety_buffer: DEFAULT_SAFETY_BUFFER_M,
            time_threshold: DEFAULT_TIME_THRESHOLD_S,
            resolution: DEFAULT_RESOLUTION_M,
        }
    }
}

impl DetectionRules {
    /// Rules with the given buffer and default threshold/resolution.
    pub fn with_safety_buffer(safety_buffer: f64) -> Self {
        Self {
            safety_buffer,
            ..Self::default()
        }
    }

    /// Reject non-positive or non-finite values.
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.safety_buffer) {
            return Err(DeconflictError::InvalidSafetyBuffer(self.safety_buffer));
        }
        if !is_positive(self.time_threshold) {
            return Err(DeconflictError::InvalidTimeThreshold(self.time_threshold));
        }
        if !is_positive(self.resolution) {
            return Err(DeconflictError::InvalidResolution(self.resolution));
        }
        Ok(())
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
