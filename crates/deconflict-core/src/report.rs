//! Conflict report persistence.

use crate::conflict::{Conflict, Detection};
use crate::encounter::Encounter;
use crate::error::{DeconflictError, Result};
use crate::rules::DetectionRules;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Everything a planner needs to review one deconfliction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictReport {
    pub generated_at: DateTime<Utc>,
    pub rules: DetectionRules,
    pub primary_id: String,
    pub missions_checked: usize,
    pub missions_skipped: usize,
    pub conflict_count: usize,
    pub conflicts: Vec<Conflict>,
    #[serde(default)]
    pub encounters: Vec<Encounter>,
}

impl ConflictReport {
    pub fn new(
        rules: DetectionRules,
        primary_id: impl Into<String>,
        detection: Detection,
        encounters: Vec<Encounter>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            rules,
            primary_id: primary_id.into(),
            missions_checked: detection.missions_checked,
            missions_skipped: detection.missions_skipped,
            conflict_count: detection.conflicts.len(),
            conflicts: detection.conflicts,
            encounters,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Write a conflict report as pretty-printed JSON.
pub fn write_report(path: impl AsRef<Path>, report: &ConflictReport) -> Result<()> {
    write_json(path, report)
}

/// Read a report written by [`write_report`].
pub fn read_report(path: impl AsRef<Path>) -> Result<ConflictReport> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| DeconflictError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

pub(crate) fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| DeconflictError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(io_err)?;
    tracing::debug!(path = %path.display(), "Wrote JSON output");
    Ok(())
}
