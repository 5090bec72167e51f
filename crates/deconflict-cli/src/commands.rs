//! Subcommand bodies, kept out of the binary so they can be tested.

use crate::settings::Settings;
use anyhow::{Context, Result};
use deconflict_core::{
    cluster_encounters, load_missions, path_length, ConflictEngine, ConflictReport,
    TrajectorySample, TrajectorySampler,
};
use std::path::Path;

/// Exit status for `check --fail-on-conflict` when conflicts are found.
pub const CONFLICT_EXIT_CODE: u8 = 2;

/// Load a mission file, run detection for its primary mission and build the
/// report. When `log_output` is set, the engine's conflict log is written
/// there as a JSON array.
pub fn run_check(
    input: &Path,
    settings: &Settings,
    log_output: Option<&Path>,
) -> Result<ConflictReport> {
    let missions = load_missions(input)
        .with_context(|| format!("loading missions from {}", input.display()))?;

    let mut engine = ConflictEngine::with_rules(settings.detection_rules())?;
    tracing::info!(
        safety_buffer = engine.rules().safety_buffer,
        time_threshold = engine.rules().time_threshold,
        resolution = engine.rules().resolution,
        "Starting deconfliction check"
    );

    let detection = engine.detect(&missions.primary_mission, &missions.other_missions);
    if let Some(path) = log_output {
        engine
            .save_log(path)
            .with_context(|| format!("writing conflict log to {}", path.display()))?;
        tracing::info!(records = engine.log().len(), "Saved conflict log to {}", path.display());
    }

    let encounters = cluster_encounters(&detection.conflicts, settings.cluster_gap_s);
    Ok(ConflictReport::new(
        *engine.rules(),
        missions.primary_mission.drone_id.clone(),
        detection,
        encounters,
    ))
}

/// Process exit status for a finished check.
pub fn exit_status(report: &ConflictReport, fail_on_conflict: bool) -> u8 {
    if fail_on_conflict && !report.is_clear() {
        CONFLICT_EXIT_CODE
    } else {
        0
    }
}

/// Sample the mission flown by `drone_id`. Only `resolution` is validated.
pub fn sample_mission(
    input: &Path,
    drone_id: &str,
    resolution: f64,
) -> Result<Vec<TrajectorySample>> {
    let sampler = TrajectorySampler::new(resolution)?;
    let missions = load_missions(input)
        .with_context(|| format!("loading missions from {}", input.display()))?;
    let mission = missions
        .find(drone_id)
        .with_context(|| format!("no mission for drone '{drone_id}'"))?;

    let samples = sampler.sample(mission);
    tracing::info!(
        drone_id = %mission.drone_id,
        samples = samples.len(),
        path_length_m = path_length(mission),
        "Sampled trajectory"
    );
    Ok(samples)
}
