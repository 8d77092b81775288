//! Classification buckets and reduced clinch/elimination conditions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{OutcomeAssignment, Schedule};

/// Where a tracked team ended up in each simulated permutation.
///
/// For every tracked team the three lists partition `0..permutation_count`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioBuckets {
    pub clinched_in: Vec<usize>,
    pub eliminated_in: Vec<usize>,
    pub still_alive_in: Vec<usize>,
}

impl ScenarioBuckets {
    pub fn total(&self) -> usize {
        self.clinched_in.len() + self.eliminated_in.len() + self.still_alive_in.len()
    }

    /// Check the partition invariant against the permutation count.
    pub fn is_partition_of(&self, permutation_count: usize) -> bool {
        if self.total() != permutation_count {
            return false;
        }
        let mut seen = vec![false; permutation_count];
        for &i in self
            .clinched_in
            .iter()
            .chain(&self.eliminated_in)
            .chain(&self.still_alive_in)
        {
            match seen.get_mut(i) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

/// Buckets per tracked team, keyed by team name.
pub type ScenarioBucketMap = BTreeMap<String, ScenarioBuckets>;

/// Per-slot requirement: `Some(winner)` or `None` for "does not matter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinimalCondition {
    slots: Vec<Option<String>>,
}

impl MinimalCondition {
    /// Condition that requires exactly the given permutation.
    pub fn from_assignment(assignment: &OutcomeAssignment, schedule: &Schedule) -> Self {
        Self {
            slots: assignment
                .winners(schedule)
                .into_iter()
                .map(|w| Some(w.to_string()))
                .collect(),
        }
    }

    pub fn from_slots(slots: Vec<Option<String>>) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Wildcard every slot where `assignment` picks a different winner.
    pub fn fold(&mut self, assignment: &OutcomeAssignment, schedule: &Schedule) {
        for (slot, required) in self.slots.iter_mut().enumerate() {
            if required.as_deref() != assignment.winner(schedule, slot) {
                *required = None;
            }
        }
    }

    /// Whether the assignment agrees with every fixed slot.
    pub fn is_satisfied_by(&self, assignment: &OutcomeAssignment, schedule: &Schedule) -> bool {
        self.slots.iter().enumerate().all(|(slot, required)| match required {
            Some(winner) => assignment.winner(schedule, slot) == Some(winner.as_str()),
            None => true,
        })
    }

    /// Fixed winners in slot order, skipping wildcards.
    pub fn required_winners(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, w)| w.as_deref().map(|w| (slot, w)))
    }

    pub fn wildcard_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }
}

/// Reduction of one bucket for one team.
///
/// Serialized as the string `"regardless"` or as an object holding the
/// non-empty paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PathReductionRepr", into = "PathReductionRepr")]
pub enum PathReduction {
    /// The bucket holds every permutation.
    Regardless,
    /// Conditions split by whether the team won its own game.
    Paths {
        win_path: Option<MinimalCondition>,
        loss_path: Option<MinimalCondition>,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PathReductionRepr {
    Label(RegardlessLabel),
    Paths {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        win_path: Option<MinimalCondition>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        loss_path: Option<MinimalCondition>,
    },
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RegardlessLabel {
    Regardless,
}

impl From<PathReductionRepr> for PathReduction {
    fn from(repr: PathReductionRepr) -> Self {
        match repr {
            PathReductionRepr::Label(RegardlessLabel::Regardless) => PathReduction::Regardless,
            PathReductionRepr::Paths {
                win_path,
                loss_path,
            } => PathReduction::Paths {
                win_path,
                loss_path,
            },
        }
    }
}

impl From<PathReduction> for PathReductionRepr {
    fn from(reduction: PathReduction) -> Self {
        match reduction {
            PathReduction::Regardless => PathReductionRepr::Label(RegardlessLabel::Regardless),
            PathReduction::Paths {
                win_path,
                loss_path,
            } => PathReductionRepr::Paths {
                win_path,
                loss_path,
            },
        }
    }
}

/// Clinch and elimination reductions for one team; absent when the bucket
/// was empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScenarios {
    #[serde(
        rename = "clinch_scenarios",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub clinch: Option<PathReduction>,

    #[serde(
        rename = "elim_scenarios",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub eliminate: Option<PathReduction>,
}

impl TeamScenarios {
    pub fn is_empty(&self) -> bool {
        self.clinch.is_none() && self.eliminate.is_none()
    }
}
