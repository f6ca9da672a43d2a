use serde::{Deserialize, Serialize};

use crate::{
    errors::AppResult,
    models::domain::sequence::{values_equal, CanonicalSequence, Permutation},
};

/// The learner's persisted arrangement for a sorting exercise.
///
/// `initial_order` is the shuffle the exercise started from and never changes after
/// creation. `sorted_numbers` is the arrangement as the learner currently sees it.
/// `current_order` tags each slot with the canonical index of the item occupying
/// it, so repeated values stay distinguishable after moves.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerState {
    pub initial_order: Permutation,
    pub sorted_numbers: Vec<f64>,
    #[serde(default)]
    pub current_order: Vec<usize>,
}

impl AnswerState {
    pub fn from_shuffle(initial_order: Permutation, arrangement: Vec<f64>) -> Self {
        let current_order = initial_order.indices().to_vec();
        Self {
            initial_order,
            sorted_numbers: arrangement,
            current_order,
        }
    }

    pub fn len(&self) -> usize {
        self.sorted_numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_numbers.is_empty()
    }

    /// Decodes a host payload. Anything that does not parse is treated as absent.
    pub fn from_payload(payload: &str) -> Option<Self> {
        match serde_json::from_str(payload) {
            Ok(state) => Some(state),
            Err(err) => {
                log::debug!("Ignoring malformed answer payload: {}", err);
                None
            }
        }
    }

    pub fn to_payload(&self) -> AppResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether this state still describes an arrangement of `sequence`.
    pub fn is_compatible_with(&self, sequence: &CanonicalSequence) -> bool {
        self.sorted_numbers.len() == sequence.len()
            && self.initial_order.is_bijection_over(sequence.len())
            && sequence.same_multiset(&self.sorted_numbers)
    }

    /// Returns a copy whose `current_order` agrees with `sorted_numbers`.
    ///
    /// Payloads written before `current_order` existed, or whose tags no longer line
    /// up with the values, get the tags re-derived: each slot takes its own
    /// `initial_order` index when that item has the same value, otherwise the first
    /// unclaimed canonical index holding that value.
    pub fn with_resolved_origins(&self, sequence: &CanonicalSequence) -> Self {
        if self.origins_match(sequence) {
            return self.clone();
        }

        let values = sequence.values();
        let mut claimed = vec![false; values.len()];
        let mut origins = Vec::with_capacity(self.sorted_numbers.len());

        for (slot, &value) in self.sorted_numbers.iter().enumerate() {
            let preferred = self
                .initial_order
                .indices()
                .get(slot)
                .copied()
                .filter(|&index| {
                    claimed.get(index) == Some(&false)
                        && values.get(index).is_some_and(|&v| values_equal(v, value))
                });
            let origin = preferred.or_else(|| {
                (0..values.len()).find(|&index| !claimed[index] && values_equal(values[index], value))
            });

            match origin {
                Some(index) => {
                    claimed[index] = true;
                    origins.push(index);
                }
                None => {
                    // Only reachable when the multisets differ; callers check compatibility first.
                    return Self {
                        current_order: Vec::new(),
                        ..self.clone()
                    };
                }
            }
        }

        Self {
            current_order: origins,
            ..self.clone()
        }
    }

    fn origins_match(&self, sequence: &CanonicalSequence) -> bool {
        let values = sequence.values();
        Permutation::from_indices(self.current_order.clone()).is_bijection_over(values.len())
            && self
                .current_order
                .iter()
                .zip(&self.sorted_numbers)
                .all(|(&index, &value)| values_equal(values[index], value))
    }
}
