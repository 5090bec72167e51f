//! Spatial math for trajectory sampling and separation checks.
//!
//! All positions live in a local Cartesian frame (meters), so distances
//! are plain Euclidean norms rather than great-circle distances.

use crate::models::{Mission, Waypoint};

/// Euclidean distance between two 3D positions in meters.
pub fn euclidean_distance(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    let dz = a.2 - b.2;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Straight-line distance between two waypoints, ignoring time.
pub fn waypoint_distance(a: &Waypoint, b: &Waypoint) -> f64 {
    euclidean_distance((a.x, a.y, a.z), (b.x, b.y, b.z))
}

/// `steps` evenly spaced values from `start` to `end` inclusive.
///
/// The last value is exactly `end` so that adjacent segments meet on the
/// same number.
pub fn linspace(start: f64, end: f64, steps: usize) -> impl Iterator<Item = f64> {
    let last = steps.saturating_sub(1);
    let step = if last == 0 {
        0.0
    } else {
        (end - start) / last as f64
    };
    (0..steps).map(move |i| {
        if i == last && last > 0 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Check whether two closed time windows overlap.
///
/// Windows that only touch at an endpoint overlap.
pub fn time_windows_overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> bool {
    !(a_end < b_start || a_start > b_end)
}

/// Total length of a mission's waypoint path in meters.
pub fn path_length(mission: &Mission) -> f64 {
    mission
        .waypoints
        .windows(2)
        .map(|pair| waypoint_distance(&pair[0], &pair[1]))
        .sum()
}
