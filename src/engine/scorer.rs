use crate::models::domain::{OrderDirection, ScoreResult};

/// Per-boundary verdicts for an arrangement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyReport {
    /// `pairs[i]` is true when positions `i` and `i + 1` are correctly ordered.
    pub pairs: Vec<bool>,
}

impl AdjacencyReport {
    pub fn correct_pairs(&self) -> usize {
        self.pairs.iter().filter(|&&ok| ok).count()
    }

    pub fn total_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn to_score(&self) -> ScoreResult {
        ScoreResult::partial(self.correct_pairs(), self.total_pairs())
    }
}

pub fn adjacency_report(arrangement: &[f64], direction: OrderDirection) -> AdjacencyReport {
    let pairs = arrangement
        .windows(2)
        .map(|pair| direction.is_ordered(pair[0], pair[1]))
        .collect();

    AdjacencyReport { pairs }
}

/// Scores an arrangement by its correctly ordered consecutive pairs.
///
/// Fewer than two values cannot be scored and yield zero.
pub fn score_arrangement(arrangement: &[f64], direction: OrderDirection) -> ScoreResult {
    adjacency_report(arrangement, direction).to_score()
}

/// Marks each position whose value matches the fully sorted answer.
pub fn position_mask(arrangement: &[f64], expected: &[f64]) -> Vec<bool> {
    arrangement
        .iter()
        .zip(expected)
        .map(|(actual, wanted)| actual == wanted)
        .collect()
}
