//! Human-readable check summaries.

use deconflict_core::{ConflictReport, Encounter};
use std::fmt::Write;

pub fn render_summary(report: &ConflictReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Primary {}: checked {} mission(s), skipped {} outside its time window",
        report.primary_id, report.missions_checked, report.missions_skipped
    );

    if report.is_clear() {
        let _ = writeln!(out, "No conflicts detected - mission is safe!");
        return out;
    }

    let _ = writeln!(
        out,
        "Detected {} conflicts in {} encounter(s)!",
        report.conflict_count,
        report.encounters.len()
    );
    for encounter in &report.encounters {
        let _ = writeln!(out, "  {}", render_encounter(encounter));
    }
    out
}

pub fn render_encounter(encounter: &Encounter) -> String {
    let loc = &encounter.closest_location;
    format!(
        "{} <-> {} t={:.1}s..{:.1}s closest {:.2}m at t={:.1}s ({:.1}, {:.1}, {:.1}) [{} pairs]",
        encounter.primary_id,
        encounter.other_id,
        encounter.start_time,
        encounter.end_time,
        encounter.closest_distance,
        encounter.closest_time,
        loc.x,
        loc.y,
        loc.z,
        encounter.sample_pairs
    )
}
