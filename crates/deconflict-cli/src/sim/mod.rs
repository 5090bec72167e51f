//! Scenario generation for deconfliction demos.
//!
//! Provides flight path shapes and pre-defined mission sets that can be
//! written out as mission files.

mod paths;
mod scenarios;

pub use paths::{CircularPath, FlightPath, LinearPath};
pub use scenarios::{
    create_converging_scenario, create_crossing_scenario, create_disjoint_scenario,
    create_parallel_scenario, create_survey_scenario, Scenario, ScenarioKind,
};
