use rand::Rng;

use crate::{
    engine::{
        adjacency_report, apply_move_to_state, normalize, position_mask, reconcile,
        score_arrangement, AnswerStore, Evaluate, Move, Reconciliation,
    },
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerState, CanonicalSequence, ScoreResult, SortingParams},
        dto::response::{SortedItem, SortingView},
    },
};

/// Changes the host reports after the widget has been loaded.
#[derive(Clone, Debug, PartialEq)]
pub enum ExerciseEvent {
    /// The author edited the widget's parameters.
    ParametersChanged(SortingParams),
    /// The host entered or left review mode.
    LockChanged(bool),
}

/// A drag-to-reorder exercise bound to its host's answer store.
pub struct SortingExercise<S, R> {
    params: SortingParams,
    sequence: CanonicalSequence,
    locked: bool,
    state: Option<AnswerState>,
    store: S,
    rng: R,
}

impl<S: AnswerStore, R: Rng> SortingExercise<S, R> {
    /// Normalizes the parameters and reconciles whatever the store holds.
    pub fn load(params: SortingParams, locked: bool, store: S, rng: R) -> AppResult<Self> {
        let sequence = normalize(&params.numbers);
        let mut exercise = Self {
            params,
            sequence,
            locked,
            state: None,
            store,
            rng,
        };
        exercise.reconcile()?;
        Ok(exercise)
    }

    /// Re-entry point for parameter and lock changes.
    pub fn handle_event(&mut self, event: ExerciseEvent) -> AppResult<()> {
        match event {
            ExerciseEvent::ParametersChanged(params) => {
                let sequence = normalize(&params.numbers);
                let sequence_changed = sequence != self.sequence;
                self.params = params;
                self.sequence = sequence;
                if sequence_changed {
                    log::info!(
                        "Sorting values changed, reconciling against {} values",
                        self.sequence.len()
                    );
                    self.reconcile()?;
                }
            }
            ExerciseEvent::LockChanged(locked) => {
                if locked != self.locked {
                    self.locked = locked;
                    self.reconcile()?;
                }
            }
        }
        Ok(())
    }

    fn reconcile(&mut self) -> AppResult<()> {
        let outcome = reconcile(&mut self.store, &self.sequence, self.locked, &mut self.rng)?;
        if outcome == Reconciliation::Inert && self.has_content() {
            log::warn!("No usable arrangement while locked, rendering empty exercise");
        }
        self.state = outcome.into_state();
        Ok(())
    }

    /// Commits one completed drag and persists the new arrangement.
    pub fn apply_move(&mut self, mv: Move) -> AppResult<&AnswerState> {
        if self.locked {
            return Err(AppError::Locked("moves are disabled in review mode".to_string()));
        }
        let Some(current) = self.state.as_ref() else {
            return Err(AppError::NoContent("there is nothing to reorder".to_string()));
        };

        let next = apply_move_to_state(current, mv)?;
        self.store.save(next.to_payload()?);
        Ok(self.state.insert(next))
    }

    pub fn answer(&self) -> Option<&AnswerState> {
        self.state.as_ref()
    }

    pub fn params(&self) -> &SortingParams {
        &self.params
    }

    pub fn sequence(&self) -> &CanonicalSequence {
        &self.sequence
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_content(&self) -> bool {
        !self.sequence.is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.locked && self.state.is_some()
    }

    /// Scores the current arrangement, or zero when there is none.
    pub fn evaluate_current(&self) -> ScoreResult {
        self.state
            .as_ref()
            .map(|state| self.evaluate(state))
            .unwrap_or_else(ScoreResult::zero)
    }

    /// Renders the widget. Review-mode feedback is derived from the current
    /// arrangement every time, never from a cached score.
    pub fn view(&self, result: Option<ScoreResult>) -> SortingView {
        let direction = self.params.order_type;
        let items: Vec<SortedItem> = self
            .state
            .as_ref()
            .map(|state| {
                state
                    .sorted_numbers
                    .iter()
                    .enumerate()
                    .map(|(slot, &value)| SortedItem {
                        slot: slot as u32,
                        value,
                        origin: state.current_order.get(slot).map(|&origin| origin as u32),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let reveal = self.locked && self.has_content();
        let values: Vec<f64> = items.iter().map(|item| item.value).collect();
        let expected = self.sequence.expected_order(direction);

        let (pair_feedback, expected_order, position_feedback) = if reveal {
            (
                Some(adjacency_report(&values, direction).pairs),
                Some(expected.clone()),
                Some(position_mask(&values, &expected)),
            )
        } else {
            (None, None, None)
        };

        let feedback = match result {
            Some(result) if self.locked && self.params.settings.show_feedback => {
                Some(if result.is_correct {
                    self.params.settings.feedback_correct.clone()
                } else {
                    self.params.settings.feedback_incorrect.clone()
                })
            }
            _ => None,
        };

        SortingView {
            question: self.params.question.clone(),
            order_type: direction,
            items,
            has_content: self.has_content(),
            locked: self.locked,
            can_submit: self.can_submit(),
            pair_feedback,
            expected_order,
            position_feedback,
            result,
            feedback,
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S, R> Evaluate for SortingExercise<S, R> {
    type Answer = AnswerState;

    fn evaluate(&self, answer: &AnswerState) -> ScoreResult {
        if self.sequence.is_empty() || !answer.is_compatible_with(&self.sequence) {
            return ScoreResult::zero();
        }
        score_arrangement(&answer.sorted_numbers, self.params.order_type)
    }
}
