//! Mission file parsing.
//!
//! Mission files are JSON documents with a `primary_mission` object and an
//! `other_missions` array, each mission carrying `drone_id`, `waypoints`,
//! `t_start`, and `t_end`.

use crate::error::{DeconflictError, Result};
use crate::models::MissionSet;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a mission set without validating it.
pub fn parse_missions(json: &str) -> Result<MissionSet> {
    Ok(serde_json::from_str(json)?)
}

/// Read, parse, and validate a mission file.
///
/// Fails on the first mission that does not pass [`crate::Mission::validate`].
pub fn load_missions(path: impl AsRef<Path>) -> Result<MissionSet> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| DeconflictError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let missions = parse_missions(&contents)?;
    validate_missions(&missions)?;

    let duplicates = duplicate_drone_ids(&missions);
    if !duplicates.is_empty() {
        tracing::warn!(
            path = %path.display(),
            drone_ids = ?duplicates,
            "Drone IDs repeat across missions; their conflicts cannot be told apart"
        );
    }

    tracing::debug!(
        path = %path.display(),
        primary = %missions.primary_mission.drone_id,
        others = missions.other_missions.len(),
        "Loaded mission file"
    );
    Ok(missions)
}

/// Validate every mission in the set, primary first.
pub fn validate_missions(missions: &MissionSet) -> Result<()> {
    for mission in missions.iter() {
        let reasons = mission.validate();
        if !reasons.is_empty() {
            return Err(DeconflictError::InvalidMission {
                drone_id: mission.drone_id.clone(),
                reasons,
            });
        }
    }
    Ok(())
}

/// Drone IDs used by more than one mission in the set, in first-seen order.
pub fn duplicate_drone_ids(missions: &MissionSet) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for mission in missions.iter() {
        let id = mission.drone_id.as_str();
        if !seen.insert(id) && !duplicates.iter().any(|d| d == id) {
            duplicates.push(id.to_string());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "primary_mission": {
            "drone_id": "TestDrone-1",
            "waypoints": [
                {"x": 0, "y": 0, "z": 0, "t": 0},
                {"x": 10, "y": 10, "z": 5, "t": 10}
            ],
            "t_start": 0,
            "t_end": 10
        },
        "other_missions": [
            {
                "drone_id": "TestDrone-2",
                "waypoints": [
                    {"x": 0, "y": 5, "z": 0, "t": 0},
                    {"x": 10, "y": 5, "z": 0, "t": 10}
                ],
                "t_start": 0,
                "t_end": 10
            }
        ]
    }"#;

    #[test]
    fn test_parses_primary_and_others() {
        let missions = parse_missions(SAMPLE).unwrap();
        assert_eq!(missions.primary_mission.drone_id, "TestDrone-1");
        assert_eq!(missions.primary_mission.waypoints.len(), 2);
        assert_eq!(missions.primary_mission.waypoints[1].z, 5.0);
        assert_eq!(missions.other_missions.len(), 1);
        assert_eq!(missions.other_missions[0].drone_id, "TestDrone-2");
        assert!(validate_missions(&missions).is_ok());
    }

    #[test]
    fn test_other_missions_default_to_empty() {
        let missions = parse_missions(
            r#"{"primary_mission": {"drone_id": "Solo", "waypoints": [], "t_start": 0, "t_end": 1}}"#,
        )
        .unwrap();
        assert!(missions.other_missions.is_empty());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = parse_missions("{ not json").unwrap_err();
        assert!(matches!(err, DeconflictError::Json(_)));
    }

    #[test]
    fn test_invalid_mission_names_the_drone() {
        let mut missions = parse_missions(SAMPLE).unwrap();
        missions.other_missions[0].t_start = 20.0;

        let err = validate_missions(&missions).unwrap_err();
        match err {
            DeconflictError::InvalidMission { drone_id, reasons } => {
                assert_eq!(drone_id, "TestDrone-2");
                assert!(!reasons.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_missions("/nonexistent/deconflict/missions.json").unwrap_err();
        assert!(matches!(err, DeconflictError::Io { .. }));
        assert!(err.to_string().contains("missions.json"));
    }

    #[test]
    fn test_duplicate_drone_ids_are_reported() {
        let mut missions = parse_missions(SAMPLE).unwrap();
        assert!(duplicate_drone_ids(&missions).is_empty());

        let mut twin = missions.other_missions[0].clone();
        twin.drone_id = "TestDrone-1".to_string();
        missions.other_missions.push(twin.clone());
        missions.other_missions.push(twin);

        assert_eq!(duplicate_drone_ids(&missions), vec!["TestDrone-1".to_string()]);
        assert!(validate_missions(&missions).is_ok());
    }
}
