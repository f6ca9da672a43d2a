use crate::models::domain::ScoreResult;

/// What every widget exposes to the host at submission time.
///
/// The host calls `evaluate` once per submission and locks the widget right after.
pub trait Evaluate {
    type Answer;

    fn evaluate(&self, answer: &Self::Answer) -> ScoreResult;
}
