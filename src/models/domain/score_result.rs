use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u8 = 100;

/// Outcome of evaluating one submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub is_correct: bool,
    pub score: u8,
    pub max_score: u8,
}

impl ScoreResult {
    /// Result for an exercise that cannot be scored (no content, degenerate input).
    pub fn zero() -> Self {
        Self {
            is_correct: false,
            score: 0,
            max_score: MAX_SCORE,
        }
    }

    pub fn all_or_nothing(is_correct: bool) -> Self {
        Self {
            is_correct,
            score: if is_correct { MAX_SCORE } else { 0 },
            max_score: MAX_SCORE,
        }
    }

    /// Partial credit proportional to `earned / possible`, rounded to the nearest point.
    pub fn partial(earned: usize, possible: usize) -> Self {
        if possible == 0 {
            return Self::zero();
        }
        let earned = earned.min(possible);
        let score = (f64::from(MAX_SCORE) * earned as f64 / possible as f64).round() as u8;

        Self {
            is_correct: earned == possible,
            score,
            max_score: MAX_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rounds_to_nearest_point() {
        let result = ScoreResult::partial(2, 3);
        assert_eq!(result.score, 67);
        assert!(!result.is_correct);

        let result = ScoreResult::partial(1, 8);
        assert_eq!(result.score, 13);
    }

    #[test]
    fn partial_with_nothing_possible_is_zero() {
        assert_eq!(ScoreResult::partial(0, 0), ScoreResult::zero());
    }

    #[test]
    fn full_credit_is_correct() {
        let result = ScoreResult::partial(3, 3);
        assert!(result.is_correct);
        assert_eq!(result.score, MAX_SCORE);
    }

    #[test]
    fn score_result_serializes_in_host_shape() {
        let json = serde_json::to_value(ScoreResult::all_or_nothing(true)).expect("should serialize");
        assert_eq!(
            json,
            serde_json::json!({ "isCorrect": true, "score": 100, "maxScore": 100 })
        );
    }
}
