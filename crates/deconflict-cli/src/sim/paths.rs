//! Flight path shapes used to build scenario missions.

use deconflict_core::{Mission, Waypoint};
use std::f64::consts::PI;

/// A continuous flight path in the local frame.
pub trait FlightPath: Send + Sync {
    /// Get (x, y, z) in meters at time t seconds from start.
    fn position(&self, t: f64) -> (f64, f64, f64);

    /// Time to fly the whole path, in seconds.
    fn duration(&self) -> f64;

    /// Discretize the path into `legs + 1` waypoints starting at `t_start`.
    fn to_mission(&self, drone_id: &str, t_start: f64, legs: usize) -> Mission {
        let legs = legs.max(1);
        let duration = self.duration();
        let waypoints = (0..=legs)
            .map(|i| {
                let offset = if i == legs {
                    duration
                } else {
                    duration * i as f64 / legs as f64
                };
                let (x, y, z) = self.position(offset);
                Waypoint::new(x, y, z, t_start + offset)
            })
            .collect();
        Mission::new(drone_id, waypoints, t_start, t_start + duration)
    }
}

/// Circular orbit around a center point.
pub struct CircularPath {
    pub center: (f64, f64),
    pub radius_m: f64,
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub start_angle: f64,
    pub clockwise: bool,
    period: f64,
}

impl CircularPath {
    /// Create a single-lap orbit.
    ///
    /// # Arguments
    /// * `center` - Orbit center (x, y) in meters
    /// * `radius_m` - Radius in meters
    /// * `altitude_m` - Flight altitude
    /// * `speed_mps` - Speed in m/s
    /// * `start_angle` - Starting angle in radians, 0 = +x axis
    /// * `clockwise` - Direction of flight
    pub fn new(
        center: (f64, f64),
        radius_m: f64,
        altitude_m: f64,
        speed_mps: f64,
        start_angle: f64,
        clockwise: bool,
    ) -> Self {
        let circumference = 2.0 * PI * radius_m;
        let period = if speed_mps > 0.0 {
            circumference / speed_mps
        } else {
            0.0
        };

        Self {
            center,
            radius_m,
            altitude_m,
            speed_mps,
            start_angle,
            clockwise,
            period,
        }
    }
}

impl FlightPath for CircularPath {
    fn position(&self, t: f64) -> (f64, f64, f64) {
        let swept = if self.period > 0.0 {
            2.0 * PI * t / self.period
        } else {
            0.0
        };
        let angle_rad = if self.clockwise {
            self.start_angle - swept
        } else {
            self.start_angle + swept
        };

        (
            self.center.0 + self.radius_m * angle_rad.cos(),
            self.center.1 + self.radius_m * angle_rad.sin(),
            self.altitude_m,
        )
    }

    fn duration(&self) -> f64 {
        self.period
    }
}

/// Straight flight between two points at constant speed and altitude.
pub struct LinearPath {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub distance_m: f64,
    duration: f64,
}

impl LinearPath {
    pub fn new(start: (f64, f64), end: (f64, f64), altitude_m: f64, speed_mps: f64) -> Self {
        let distance_m = (end.0 - start.0).hypot(end.1 - start.1);
        let duration = if speed_mps > 0.0 {
            distance_m / speed_mps
        } else {
            0.0
        };

        Self {
            start,
            end,
            altitude_m,
            speed_mps,
            distance_m,
            duration,
        }
    }
}

impl FlightPath for LinearPath {
    fn position(&self, t: f64) -> (f64, f64, f64) {
        // Clamp progress to [0, 1]
        let progress = if self.duration > 0.0 {
            (t / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };

        (
            self.start.0 + progress * (self.end.0 - self.start.0),
            self.start.1 + progress * (self.end.1 - self.start.1),
            self.altitude_m,
        )
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}
