//! Deconfliction CLI - command line checks for planned drone missions.
//!
//! This crate provides the `deconflict` binary:
//! - check: run a primary mission against other traffic and report conflicts
//! - trajectory: dump one mission's sampled trajectory
//! - scenario: write a built-in mission set

pub mod commands;
pub mod settings;
pub mod sim;
pub mod summary;

pub use commands::{exit_status, run_check, sample_mission, CONFLICT_EXIT_CODE};
pub use settings::{RuleOverrides, Settings};
pub use summary::render_summary;
