//! Encounter clustering over raw conflict records.
//!
//! Detection emits one record per offending sample pair, so a single close
//! pass can produce thousands of records. This pass folds them into one
//! [`Encounter`] per continuous close approach. Nothing in detection calls
//! it; callers opt in.

use crate::conflict::{Conflict, Location};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A continuous close approach between two missions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub primary_id: String,
    pub other_id: String,
    pub start_time: f64,
    pub end_time: f64,
    /// Time of the closest sample pair
    pub closest_time: f64,
    pub closest_location: Location,
    pub closest_distance: f64,
    /// Number of conflict records folded into this encounter
    pub sample_pairs: usize,
}

impl Encounter {
    fn open(conflict: &Conflict) -> Self {
        Self {
            primary_id: conflict.primary_id.clone(),
            other_id: conflict.other_id.clone(),
            start_time: conflict.time,
            end_time: conflict.time,
            closest_time: conflict.time,
            closest_location: conflict.location,
            closest_distance: conflict.distance,
            sample_pairs: 1,
        }
    }

    fn absorb(&mut self, conflict: &Conflict) {
        self.end_time = self.end_time.max(conflict.time);
        self.sample_pairs += 1;
        if conflict.distance < self.closest_distance {
            self.closest_distance = conflict.distance;
            self.closest_time = conflict.time;
            self.closest_location = conflict.location;
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Group conflicts into encounters.
///
/// Records are grouped per `(primary_id, other_id)` and ordered by time; a
/// new encounter starts when the gap to the previous record exceeds
/// `max_gap_s`. Output is ordered by start time, then drone IDs.
///
/// Records carry drone IDs, not mission indices, so two missions flown
/// under the same `drone_id` share one group and their overlapping records
/// merge into one encounter. [`crate::duplicate_drone_ids`] reports such
/// IDs in a mission set.
pub fn cluster_encounters(conflicts: &[Conflict], max_gap_s: f64) -> Vec<Encounter> {
    let max_gap_s = if max_gap_s.is_nan() { 0.0 } else { max_gap_s.max(0.0) };

    let mut by_pair: BTreeMap<(&str, &str), Vec<&Conflict>> = BTreeMap::new();
    for conflict in conflicts {
        by_pair
            .entry((conflict.primary_id.as_str(), conflict.other_id.as_str()))
            .or_default()
            .push(conflict);
    }

    let mut encounters = Vec::new();
    for (_, mut group) in by_pair {
        group.sort_by(|a, b| a.time.total_cmp(&b.time));

        let mut current: Option<Encounter> = None;
        for conflict in group {
            let continues = current
                .as_ref()
                .is_some_and(|encounter| conflict.time - encounter.end_time <= max_gap_s);

            if continues {
                if let Some(encounter) = current.as_mut() {
                    encounter.absorb(conflict);
                }
            } else if let Some(done) = current.replace(Encounter::open(conflict)) {
                encounters.push(done);
            }
        }
        encounters.extend(current);
    }

    encounters.sort_by(|a, b| {
        a.start_time
            .total_cmp(&b.start_time)
            .then_with(|| a.primary_id.cmp(&b.primary_id))
            .then_with(|| a.other_id.cmp(&b.other_id))
    });
    encounters
}
