//! Pre-defined mission sets for demos and smoke tests.

use super::paths::{CircularPath, FlightPath, LinearPath};
use clap::ValueEnum;
use deconflict_core::{Mission, MissionSet};

const OFFSET_M: f64 = 300.0;
const ALTITUDE_M: f64 = 50.0;
const SPEED_MPS: f64 = 10.0;
const LEGS: usize = 6;

/// Named scenario consisting of a primary mission and the traffic around it.
pub struct Scenario {
    pub name: String,
    pub primary: Mission,
    pub others: Vec<Mission>,
}

impl Scenario {
    pub fn into_mission_set(self) -> MissionSet {
        MissionSet {
            primary_mission: self.primary,
            other_missions: self.others,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    Crossing,
    Parallel,
    Converging,
    Disjoint,
    Survey,
}

impl ScenarioKind {
    pub fn build(self) -> Scenario {
        match self {
            Self::Crossing => create_crossing_scenario(),
            Self::Parallel => create_parallel_scenario(),
            Self::Converging => create_converging_scenario(),
            Self::Disjoint => create_disjoint_scenario(),
            Self::Survey => create_survey_scenario(),
        }
    }
}

/// West-to-east pass through the origin, used as the primary in every scenario.
fn primary_pass() -> Mission {
    LinearPath::new((-OFFSET_M, 0.0), (OFFSET_M, 0.0), ALTITUDE_M, SPEED_MPS)
        .to_mission("PRIMARY", 0.0, LEGS)
}

/// Create two drones on collision course (crossing at center).
///
/// - Primary: flying west to east through the origin
/// - Other: flying south to north through the origin on the same schedule
pub fn create_crossing_scenario() -> Scenario {
    let crossing = LinearPath::new((0.0, -OFFSET_M), (0.0, OFFSET_M), ALTITUDE_M, SPEED_MPS)
        .to_mission("DRONE001", 0.0, LEGS);

    Scenario {
        name: "crossing".to_string(),
        primary: primary_pass(),
        others: vec![crossing],
    }
}

/// Create two drones flying parallel paths 100 m apart (no conflict).
pub fn create_parallel_scenario() -> Scenario {
    let separation_m = 100.0;
    let parallel = LinearPath::new(
        (-OFFSET_M, separation_m),
        (OFFSET_M, separation_m),
        ALTITUDE_M,
        SPEED_MPS,
    )
    .to_mission("DRONE001", 0.0, LEGS);

    Scenario {
        name: "parallel".to_string(),
        primary: primary_pass(),
        others: vec![parallel],
    }
}

/// Three drones converging on the origin from the north, south, and east.
pub fn create_converging_scenario() -> Scenario {
    let starts: [(f64, f64); 3] = [(0.0, OFFSET_M), (0.0, -OFFSET_M), (OFFSET_M, 0.0)];

    let others = starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            LinearPath::new(start, (0.0, 0.0), ALTITUDE_M, 8.0).to_mission(
                &format!("DRONE{:03}", i + 1),
                0.0,
                LEGS,
            )
        })
        .collect();

    Scenario {
        name: "converging".to_string(),
        primary: primary_pass(),
        others,
    }
}

/// Same route as the primary, but scheduled after the primary has landed.
pub fn create_disjoint_scenario() -> Scenario {
    let primary = primary_pass();
    let later = LinearPath::new((-OFFSET_M, 0.0), (OFFSET_M, 0.0), ALTITUDE_M, SPEED_MPS)
        .to_mission("DRONE001", primary.t_end + 60.0, LEGS);

    Scenario {
        name: "disjoint".to_string(),
        primary,
        others: vec![later],
    }
}

/// A survey drone orbiting across the primary's route, plus a high-altitude transit.
pub fn create_survey_scenario() -> Scenario {
    let orbit = CircularPath::new(
        (0.0, 150.0),
        150.0,
        ALTITUDE_M,
        15.0,
        -std::f64::consts::FRAC_PI_2,
        false,
    )
    .to_mission("Survey-1", 0.0, 24);
    let transit = LinearPath::new((OFFSET_M, -OFFSET_M), (-OFFSET_M, OFFSET_M), 120.0, 12.0)
        .to_mission("Transit-1", 5.0, LEGS);

    Scenario {
        name: "survey".to_string(),
        primary: primary_pass(),
        others: vec![orbit, transit],
    }
}
