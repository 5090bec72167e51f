//! Error types for deconfliction setup and mission I/O.
//!
//! Detection itself cannot fail once the engine is built; every variant
//! here belongs to configuration or data preparation.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeconflictError {
    /// Safety buffer was zero, negative, or not a finite number.
    #[error("safety buffer must be a positive distance in meters, got {0}")]
    InvalidSafetyBuffer(f64),

    /// Sampling resolution was zero, negative, or not a finite number.
    #[error("sampling resolution must be a positive distance in meters, got {0}")]
    InvalidResolution(f64),

    /// Time threshold was zero, negative, or not a finite number.
    #[error("time threshold must be a positive duration in seconds, got {0}")]
    InvalidTimeThreshold(f64),

    /// A mission failed validation when loaded.
    #[error("mission '{drone_id}' is invalid: {}", .reasons.join("; "))]
    InvalidMission {
        drone_id: String,
        reasons: Vec<String>,
    },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DeconflictError>;
