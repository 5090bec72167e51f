//! Spatio-temporal conflict detection between planned missions.
//!
//! The primary mission is sampled once per call and compared sample by
//! sample against each other mission whose declared time window overlaps
//! it. Every sample pair that is both close in space and close in time
//! produces one [`Conflict`] record.

use crate::error::Result;
use crate::models::Mission;
use crate::report::write_json;
use crate::rules::DetectionRules;
use crate::spatial::{euclidean_distance, time_windows_overlap};
use crate::trajectory::{TrajectorySample, TrajectorySampler};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A position in the local frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&TrajectorySample> for Location {
    fn from(sample: &TrajectorySample) -> Self {
        Self {
            x: sample.x,
            y: sample.y,
            z: sample.z,
        }
    }
}

/// One sample pair that violated both the spatial and temporal thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Midpoint of the two samples' timestamps
    pub time: f64,
    /// Primary trajectory's sample position
    pub location: Location,
    #[serde(alias = "primary_drone")]
    pub primary_id: String,
    #[serde(alias = "conflicting_drone")]
    pub other_id: String,
    /// Separation at detection, meters
    pub distance: f64,
}

/// Outcome of checking a primary mission against a batch of others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub conflicts: Vec<Conflict>,
    /// Missions whose time window overlapped the primary's and were compared
    pub missions_checked: usize,
    /// Missions dropped by the time-window pre-filter
    pub missions_skipped: usize,
}

/// Strategic deconfliction engine.
///
/// Holds the detection thresholds and an append-only log of every conflict
/// found over the engine's lifetime. Appending to the log needs `&mut self`;
/// share an engine across threads only behind a lock, or give each caller
/// its own engine. [`ConflictEngine::scan`] leaves the log alone.
#[derive(Debug, Clone)]
pub struct ConflictEngine {
    rules: DetectionRules,
    sampler: TrajectorySampler,
    conflict_log: Vec<Conflict>,
}

impl Default for ConflictEngine {
    fn default() -> Self {
        let rules = DetectionRules::default();
        Self {
            sampler: TrajectorySampler::default(),
            rules,
            conflict_log: Vec::new(),
        }
    }
}

impl ConflictEngine {
    /// Create an engine with the given safety buffer (meters) and default
    /// time threshold and sampling resolution.
    pub fn new(safety_buffer: f64) -> Result<Self> {
        Self::with_rules(DetectionRules::with_safety_buffer(safety_buffer))
    }

    /// Create an engine from a full rule set.
    pub fn with_rules(rules: DetectionRules) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            sampler: TrajectorySampler::new(rules.resolution)?,
            rules,
            conflict_log: Vec::new(),
        })
    }

    pub fn rules(&self) -> &DetectionRules {
        &self.rules
    }

    /// Every conflict recorded so far, in detection order.
    pub fn log(&self) -> &[Conflict] {
        &self.conflict_log
    }

    pub fn clear_log(&mut self) {
        self.conflict_log.clear();
    }

    /// Drain the log, leaving it empty.
    pub fn take_log(&mut self) -> Vec<Conflict> {
        std::mem::take(&mut self.conflict_log)
    }

    /// Write the accumulated log as a JSON array.
    pub fn save_log(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path, &self.conflict_log)
    }

    /// Check `primary` against `others`, returning this call's conflicts and
    /// appending them to the log.
    pub fn detect_conflicts(&mut self, primary: &Mission, others: &[Mission]) -> Vec<Conflict> {
        self.detect(primary, others).conflicts
    }

    /// Same as [`ConflictEngine::detect_conflicts`] but also reports how many
    /// missions were compared or pre-filtered.
    pub fn detect(&mut self, primary: &Mission, others: &[Mission]) -> Detection {
        let detection = self.evaluate(primary, others);
        self.conflict_log.extend(detection.conflicts.iter().cloned());
        detection
    }

    /// Detect conflicts without recording them.
    pub fn scan(&self, primary: &Mission, others: &[Mission]) -> Vec<Conflict> {
        self.evaluate(primary, others).conflicts
    }

    /// Run detection without touching the log.
    pub fn evaluate(&self, primary: &Mission, others: &[Mission]) -> Detection {
        let mut detection = Detection::default();
        let primary_traj = self.sampler.sample(primary);

        for other in others {
            // Disjoint windows: no sample pair can be within the time threshold
            if !time_windows_overlap(primary.t_start, primary.t_end, other.t_start, other.t_end) {
                tracing::debug!(
                    primary = %primary.drone_id,
                    other = %other.drone_id,
                    "Skipping mission outside primary time window"
                );
                detection.missions_skipped += 1;
                continue;
            }

            let other_traj = self.sampler.sample(other);
            let before = detection.conflicts.len();
            self.compare_trajectories(
                primary,
                &primary_traj,
                other,
                &other_traj,
                &mut detection.conflicts,
            );
            detection.missions_checked += 1;

            tracing::debug!(
                primary = %primary.drone_id,
                other = %other.drone_id,
                primary_samples = primary_traj.len(),
                other_samples = other_traj.len(),
                conflicts = detection.conflicts.len() - before,
                "Compared trajectories"
            );
        }

        tracing::info!(
            primary = %primary.drone_id,
            checked = detection.missions_checked,
            skipped = detection.missions_skipped,
            conflicts = detection.conflicts.len(),
            "Deconfliction check complete"
        );

        detection
    }

    /// Pairwise test over the full cross product, primary index outermost.
    fn compare_trajectories(
        &self,
        primary: &Mission,
        primary_traj: &[TrajectorySample],
        other: &Mission,
        other_traj: &[TrajectorySample],
        conflicts: &mut Vec<Conflict>,
    ) {
        for p in primary_traj {
            for o in other_traj {
                let time_gap = (p.t - o.t).abs();
                if time_gap >= self.rules.time_threshold || time_gap.is_nan() {
                    continue;
                }

                let distance = euclidean_distance(p.position(), o.position());
                if distance < self.rules.safety_buffer {
                    conflicts.push(Conflict {
                        time: (p.t + o.t) / 2.0,
                        location: Location::from(p),
                        primary_id: primary.drone_id.clone(),
                        other_id: other.drone_id.clone(),
                        distance,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;
    use crate::rules::{DEFAULT_RESOLUTION_M, DEFAULT_TIME_THRESHOLD_S};

    fn eastbound(drone_id: &str, y: f64) -> Mission {
        Mission::new(
            drone_id,
            vec![
                Waypoint::new(0.0, y, 0.0, 0.0),
                Waypoint::new(100.0, y, 0.0, 100.0),
            ],
            0.0,
            100.0,
        )
    }

    fn crossing() -> Mission {
        Mission::new(
            "Conflict-1",
            vec![
                Waypoint::new(50.0, 5.0, 0.0, 50.0),
                Waypoint::new(50.0, 15.0, 0.0, 60.0),
            ],
            50.0,
            60.0,
        )
    }

    #[test]
    fn test_no_conflict_when_separated() {
        let mut engine = ConflictEngine::new(5.0).unwrap();
        let primary = eastbound("Test-1", 0.0);
        let conflicts = engine.detect_conflicts(&primary, &[eastbound("Test-2", 10.0)]);
        assert!(conflicts.is_empty());
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_parallel_tracks_conflict_inside_buffer() {
        let mut engine = ConflictEngine::new(15.0).unwrap();
        let primary = eastbound("Test-1", 0.0);
        let conflicts = engine.detect_conflicts(&primary, &[eastbound("Test-2", 10.0)]);
        assert!(!conflicts.is_empty());
        assert!(conflicts.iter().all(|c| c.distance >= 10.0 && c.distance < 15.0));
    }

    #[test]
    fn test_crossing_path_conflict() {
        let mut engine = ConflictEngine::new(15.0).unwrap();
        let conflicts = engine.detect_conflicts(&eastbound("Test-1", 0.0), &[crossing()]);

        assert!(!conflicts.is_empty());
        assert!(conflicts.iter().all(|c| c.distance < 15.0));
        assert!(conflicts
            .iter()
            .all(|c| c.primary_id == "Test-1" && c.other_id == "Conflict-1"));
        // The crossing drone only flies between t=50 and t=60
        assert!(conflicts.iter().all(|c| c.time > 49.0 && c.time < 61.0));
    }

    #[test]
    fn test_conflict_record_fields() {
        let rules = DetectionRules {
            safety_buffer: 2.0,
            time_threshold: 1.0,
            resolution: 1.0,
        };
        let engine = ConflictEngine::with_rules(rules).unwrap();
        let primary = Mission::from_waypoints(
            "P",
            vec![Waypoint::new(0.0, 0.0, 0.0, 0.0), Waypoint::new(2.0, 0.0, 0.0, 2.0)],
        );
        let other = Mission::from_waypoints(
            "O",
            vec![Waypoint::new(0.0, 1.0, 0.0, 0.5), Waypoint::new(2.0, 1.0, 0.0, 2.5)],
        );

        // Both legs sample to two points: t=0,2 and t=0.5,2.5
        let conflicts = engine.scan(&primary, &[other]);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(
            conflicts[0],
            Conflict {
                time: 0.25,
                location: Location { x: 0.0, y: 0.0, z: 0.0 },
                primary_id: "P".to_string(),
                other_id: "O".to_string(),
                distance: 1.0,
            }
        );
        assert_eq!(conflicts[1].time, 2.25);
        assert_eq!(conflicts[1].location, Location { x: 2.0, y: 0.0, z: 0.0 });
    }

    #[test]
    fn test_thresholds_are_strict() {
        let rules = DetectionRules {
            safety_buffer: 3.0,
            time_threshold: 1.0,
            resolution: 10.0,
        };
        let engine = ConflictEngine::with_rules(rules).unwrap();
        let primary = Mission::from_waypoints(
            "P",
            vec![Waypoint::new(0.0, 0.0, 0.0, 0.0), Waypoint::new(1.0, 0.0, 0.0, 10.0)],
        );

        // Exactly at the buffer distance, same time
        let at_buffer = Mission::from_waypoints(
            "Edge-D",
            vec![Waypoint::new(0.0, 3.0, 0.0, 0.0), Waypoint::new(1.0, 3.0, 0.0, 10.0)],
        );
        assert!(engine.scan(&primary, &[at_buffer]).is_empty());

        // Same place, exactly one second apart
        let at_threshold = Mission::from_waypoints(
            "Edge-T",
            vec![Waypoint::new(0.0, 0.0, 0.0, 1.0), Waypoint::new(1.0, 0.0, 0.0, 11.0)],
        );
        assert!(engine.scan(&primary, &[at_threshold]).is_empty());
    }

    #[test]
    fn test_disjoint_time_windows_are_skipped() {
        let mut engine = ConflictEngine::new(50.0).unwrap();
        let primary = eastbound("P", 0.0);
        let mut later = eastbound("Later", 0.0);
        later.t_start = 100.5;
        later.t_end = 200.0;

        let detection = engine.detect(&primary, &[later]);
        assert!(detection.conflicts.is_empty());
        assert_eq!(detection.missions_skipped, 1);
        assert_eq!(detection.missions_checked, 0);
    }

    #[test]
    fn test_degenerate_mission_contributes_nothing() {
        let mut engine = ConflictEngine::new(50.0).unwrap();
        let hover = Mission::new("Hover", vec![Waypoint::new(50.0, 0.0, 0.0, 50.0)], 0.0, 100.0);

        assert!(engine.detect_conflicts(&eastbound("P", 0.0), &[hover.clone()]).is_empty());
        assert!(engine.detect_conflicts(&hover, &[eastbound("P", 0.0)]).is_empty());
    }

    #[test]
    fn test_log_accumulates_across_calls() {
        let mut engine = ConflictEngine::new(15.0).unwrap();
        let primary = eastbound("Test-1", 0.0);

        let first = engine.detect_conflicts(&primary, &[crossing()]);
        let second = engine.detect_conflicts(&primary, &[eastbound("Test-2", 10.0)]);

        assert!(!first.is_empty());
        assert!(!second.is_empty());
        assert!(second.iter().all(|c| c.other_id == "Test-2"));
        assert_eq!(engine.log().len(), first.len() + second.len());
        assert_eq!(&engine.log()[..first.len()], first.as_slice());
        assert_eq!(&engine.log()[first.len()..], second.as_slice());

        let drained = engine.take_log();
        assert_eq!(drained.len(), first.len() + second.len());
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_scan_leaves_log_untouched() {
        let engine = ConflictEngine::new(15.0).unwrap();
        let conflicts = engine.scan(&eastbound("Test-1", 0.0), &[crossing()]);
        assert!(!conflicts.is_empty());
        assert!(engine.log().is_empty());
    }

    #[test]
    fn test_output_order_is_primary_then_other_index() {
        let rules = DetectionRules {
            safety_buffer: 100.0,
            time_threshold: 10.0,
            resolution: 1.0,
        };
        let engine = ConflictEngine::with_rules(rules).unwrap();
        let primary = Mission::from_waypoints(
            "P",
            vec![Waypoint::new(0.0, 0.0, 0.0, 0.0), Waypoint::new(3.0, 0.0, 0.0, 3.0)],
        );
        let other = Mission::from_waypoints(
            "O",
            vec![Waypoint::new(0.0, 1.0, 0.0, 0.0), Waypoint::new(3.0, 1.0, 0.0, 3.0)],
        );

        // 3 x 3 samples, all within both thresholds
        let conflicts = engine.scan(&primary, &[other]);
        assert_eq!(conflicts.len(), 9);
        let xs: Vec<f64> = conflicts.iter().map(|c| c.location.x).collect();
        assert_eq!(xs, vec![0.0, 0.0, 0.0, 1.5, 1.5, 1.5, 3.0, 3.0, 3.0]);
        assert_eq!(conflicts[0].time, 0.0);
        assert_eq!(conflicts[1].time, 0.75);
        assert_eq!(conflicts[2].time, 1.5);
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        assert!(ConflictEngine::new(0.0).is_err());
        assert!(ConflictEngine::new(-5.0).is_err());
        assert!(ConflictEngine::with_rules(DetectionRules {
            safety_buffer: 10.0,
            time_threshold: 0.0,
            resolution: 0.1,
        })
        .is_err());
    }

    #[test]
    fn test_legacy_field_names_deserialize() {
        let conflict: Conflict = serde_json::from_str(
            r#"{"time": 1.5, "location": {"x": 1, "y": 2, "z": 3},
                "primary_drone": "A", "conflicting_drone": "B", "distance": 4.0}"#,
        )
        .unwrap();
        assert_eq!(conflict.primary_id, "A");
        assert_eq!(conflict.other_id, "B");
    }

    #[test]
    fn test_rules_reflect_construction() {
        let engine = ConflictEngine::new(25.0).unwrap();
        assert_eq!(engine.rules().safety_buffer, 25.0);
        assert_eq!(engine.rules().time_threshold, DEFAULT_TIME_THRESHOLD_S);
        assert_eq!(engine.rules().resolution, DEFAULT_RESOLUTION_M);
    }

    #[test]
    fn test_clear_log_then_detect_appends_again() {
        let mut engine = ConflictEngine::new(15.0).unwrap();
        let primary = eastbound("Test-1", 0.0);

        assert!(!engine.detect_conflicts(&primary, &[crossing()]).is_empty());
        engine.clear_log();
        assert!(engine.log().is_empty());

        let second = engine.detect_conflicts(&primary, &[eastbound("Test-2", 10.0)]);
        assert!(!second.is_empty());
        assert_eq!(engine.log(), second.as_slice());
    }

    #[test]
    fn test_save_log_writes_log_order_array() {
        let dir = std::env::temp_dir().join(format!("deconflict-log-{}", std::process::id()));
        let path = dir.join("conflicts.json");

        let mut engine = ConflictEngine::new(15.0).unwrap();
        let primary = eastbound("Test-1", 0.0);
        engine.detect_conflicts(&primary, &[crossing()]);
        engine.detect_conflicts(&primary, &[eastbound("Test-2", 10.0)]);
        engine.save_log(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("[\n  {\n    \"time\""));

        let saved: Vec<Conflict> = serde_json::from_str(&contents).unwrap();
        assert_eq!(saved.as_slice(), engine.log());
        assert_eq!(saved.first().map(|c| c.other_id.as_str()), Some("Conflict-1"));
        assert_eq!(saved.last().map(|c| c.other_id.as_str()), Some("Test-2"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
