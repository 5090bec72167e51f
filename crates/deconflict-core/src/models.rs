//! Core data models for mission deconfliction.

use serde::{Deserialize, Serialize};

/// A timed 3D checkpoint on a mission path.
///
/// Positions are in meters in a local Cartesian frame, `t` is mission
/// time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub t: f64,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self { x, y, z, t }
    }
}

/// A drone's planned mission: ordered waypoints plus a declared time window.
///
/// The engine assumes waypoint times are non-decreasing and that the first
/// and last waypoint fall inside `[t_start, t_end]`. It does not check;
/// use [`Mission::validate`] at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    #[serde(default = "unnamed_drone")]
    pub drone_id: String,
    pub waypoints: Vec<Waypoint>,
    pub t_start: f64,
    pub t_end: f64,
}

fn unnamed_drone() -> String {
    "unnamed".to_string()
}

impl Mission {
    pub fn new(
        drone_id: impl Into<String>,
        waypoints: Vec<Waypoint>,
        t_start: f64,
        t_end: f64,
    ) -> Self {
        Self {
            drone_id: drone_id.into(),
            waypoints,
            t_start,
            t_end,
        }
    }

    /// Build a mission whose time window spans its first and last waypoint.
    pub fn from_waypoints(drone_id: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        let t_start = waypoints.first().map(|wp| wp.t).unwrap_or(0.0);
        let t_end = waypoints.last().map(|wp| wp.t).unwrap_or(t_start);
        Self::new(drone_id, waypoints, t_start, t_end)
    }

    /// Validate mission timing and coordinates.
    /// Returns list of validation errors (empty = valid).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.t_start.is_finite() || !self.t_end.is_finite() {
            errors.push("Time window bounds must be finite".to_string());
        } else if self.t_start > self.t_end {
            errors.push(format!(
                "Start time ({}) must not be after end time ({})",
                self.t_start, self.t_end
            ));
        }

        for (idx, wp) in self.waypoints.iter().enumerate() {
            if !(wp.x.is_finite() && wp.y.is_finite() && wp.z.is_finite() && wp.t.is_finite()) {
                errors.push(format!("Waypoint {idx} has a non-finite coordinate"));
            }
        }

        for (idx, pair) in self.waypoints.windows(2).enumerate() {
            if pair[1].t < pair[0].t {
                errors.push(format!(
                    "Waypoint {} time ({}) is earlier than waypoint {} time ({})",
                    idx + 1,
                    pair[1].t,
                    idx,
                    pair[0].t
                ));
            }
        }

        if let (Some(first), Some(last)) = (self.waypoints.first(), self.waypoints.last()) {
            if first.t < self.t_start || first.t > self.t_end {
                errors.push(format!(
                    "First waypoint time ({}) is outside the mission window [{}, {}]",
                    first.t, self.t_start, self.t_end
                ));
            }
            if last.t < self.t_start || last.t > self.t_end {
                errors.push(format!(
                    "Last waypoint time ({}) is outside the mission window [{}, {}]",
                    last.t, self.t_start, self.t_end
                ));
            }
        }

        errors
    }

    /// Check if mission is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// The primary mission under review plus every mission it must be checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSet {
    pub primary_mission: Mission,
    #[serde(default)]
    pub other_missions: Vec<Mission>,
}

impl MissionSet {
    /// Look up a mission by drone ID, primary first.
    pub fn find(&self, drone_id: &str) -> Option<&Mission> {
        std::iter::once(&self.primary_mission)
            .chain(self.other_missions.iter())
            .find(|mission| mission.drone_id == drone_id)
    }

    /// Iterate over all missions, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &Mission> {
        std::iter::once(&self.primary_mission).chain(self.other_missions.iter())
    }
}
