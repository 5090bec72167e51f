//! Waypoint-to-trajectory densification.
//!
//! Each leg between consecutive waypoints is flown as a straight line at
//! whatever constant speed makes both waypoint timestamps hold, so every
//! coordinate (including time) is interpolated independently.

use crate::error::{DeconflictError, Result};
use crate::models::Mission;
use crate::rules::{is_positive, DEFAULT_RESOLUTION_M};
use crate::spatial::{linspace, waypoint_distance};
use serde::{Deserialize, Serialize};

/// An interpolated, time-stamped position on a mission's trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl TrajectorySample {
    pub fn position(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

/// Samples missions at a fixed spatial resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySampler {
    resolution: f64,
}

impl Default for TrajectorySampler {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION_M,
        }
    }
}

impl TrajectorySampler {
    /// Create a sampler with the target spacing between samples, in meters.
    pub fn new(resolution: f64) -> Result<Self> {
        if !is_positive(resolution) {
            return Err(DeconflictError::InvalidResolution(resolution));
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn sample(&self, mission: &Mission) -> Vec<TrajectorySample> {
        sample_trajectory(mission, self.resolution)
    }
}

/// Convert a mission's waypoints into a dense trajectory.
///
/// Every non-degenerate leg yields `max(2, floor(length / resolution))`
/// samples, endpoints included. Zero-length legs yield nothing, and the
/// shared endpoint of two adjacent legs appears twice.
pub fn sample_trajectory(mission: &Mission, resolution: f64) -> Vec<TrajectorySample> {
    let mut trajectory = Vec::new();

    for leg in mission.waypoints.windows(2) {
        let (wp1, wp2) = (&leg[0], &leg[1]);

        let distance = waypoint_distance(wp1, wp2);
        if distance == 0.0 {
            continue;
        }

        let steps = ((distance / resolution).floor() as usize).max(2);
        trajectory.reserve(steps);

        let xs = linspace(wp1.x, wp2.x, steps);
        let ys = linspace(wp1.y, wp2.y, steps);
        let zs = linspace(wp1.z, wp2.z, steps);
        let ts = linspace(wp1.t, wp2.t, steps);

        trajectory.extend(
            xs.zip(ys)
                .zip(zs)
                .zip(ts)
                .map(|(((x, y), z), t)| TrajectorySample { x, y, z, t }),
        );
    }

    trajectory
}
