use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::domain::order_direction::OrderDirection;

/// Author-entered values in the order they were entered.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSequence(Vec<f64>);

impl CanonicalSequence {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compares value multisets, ignoring order.
    pub fn same_multiset(&self, other: &[f64]) -> bool {
        if self.0.len() != other.len() {
            return false;
        }
        sorted_copy(&self.0) == sorted_copy(other)
    }

    /// The values arranged the way a fully correct answer would show them.
    pub fn expected_order(&self, direction: OrderDirection) -> Vec<f64> {
        let mut values = sorted_copy(&self.0);
        if direction == OrderDirection::Descending {
            values.reverse();
        }
        values
    }
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut copy = values.to_vec();
    copy.sort_by(f64::total_cmp);
    copy
}

/// Slot `i` holds the canonical index of the item shown at position `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every index in `[0, len)` appears exactly once.
    pub fn is_bijection_over(&self, len: usize) -> bool {
        if self.0.len() != len {
            return false;
        }
        let mut seen = vec![false; len];
        for &index in &self.0 {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Arranges `values` in this permutation's order. Out-of-range slots are skipped.
    pub fn arrange(&self, values: &[f64]) -> Vec<f64> {
        self.0
            .iter()
            .filter_map(|&index| values.get(index).copied())
            .collect()
    }
}

/// Equality helper used where `f64` must be compared as a value, `-0 == 0`.
pub(crate) fn values_equal(left: f64, right: f64) -> bool {
    left.partial_cmp(&right) == Some(Ordering::Equal)
}
