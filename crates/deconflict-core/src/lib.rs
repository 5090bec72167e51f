//! Strategic deconfliction for planned drone missions.
//!
//! Missions are densified into time-stamped trajectories and checked pairwise
//! against a primary mission under a joint space/time separation threshold.

pub mod conflict;
pub mod encounter;
pub mod error;
pub mod mission_file;
pub mod models;
pub mod report;
pub mod rules;
pub mod spatial;
pub mod trajectory;

pub use conflict::{Conflict, ConflictEngine, Detection, Location};
pub use encounter::{cluster_encounters, Encounter};
pub use error::{DeconflictError, Result};
pub use mission_file::{duplicate_drone_ids, load_missions, parse_missions, validate_missions};
pub use models::{Mission, MissionSet, Waypoint};
pub use report::{read_report, write_report, ConflictReport};
pub use rules::DetectionRules;
pub use spatial::{euclidean_distance, path_length};
pub use trajectory::{sample_trajectory, TrajectorySample, TrajectorySampler};
