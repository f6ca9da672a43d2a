use crate::{
    engine::{AnswerStore, Evaluate},
    errors::AppResult,
    models::{
        domain::{AnswerKey, MultipleChoiceAnswer, MultipleChoiceParams, ScoreResult},
        dto::response::{MultipleChoiceView, OptionState, OptionView},
    },
};

/// A four-option question with a single correct key.
pub struct MultipleChoiceExercise<S> {
    params: MultipleChoiceParams,
    locked: bool,
    selection: Option<MultipleChoiceAnswer>,
    store: S,
}

impl<S: AnswerStore> MultipleChoiceExercise<S> {
    pub fn load(params: MultipleChoiceParams, locked: bool, store: S) -> Self {
        let selection = store.load().and_then(|payload| {
            serde_json::from_str::<MultipleChoiceAnswer>(&payload)
                .map_err(|err| log::debug!("Ignoring malformed selection payload: {}", err))
                .ok()
        });

        Self {
            params,
            locked,
            selection,
            store,
        }
    }

    /// Records the learner's pick. Ignored in review mode; returns whether the
    /// selection was taken.
    pub fn select(&mut self, key: AnswerKey) -> AppResult<bool> {
        if self.locked {
            log::debug!("Ignoring selection of {:?} in review mode", key);
            return Ok(false);
        }

        let answer = MultipleChoiceAnswer { selected: key };
        self.store.save(serde_json::to_string(&answer)?);
        self.selection = Some(answer);
        Ok(true)
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn answer(&self) -> Option<MultipleChoiceAnswer> {
        self.selection
    }

    pub fn can_submit(&self) -> bool {
        !self.locked && self.selection.is_some()
    }

    pub fn view(&self, result: Option<ScoreResult>) -> MultipleChoiceView {
        let selected = self.selection.map(|answer| answer.selected);
        let correct = self.params.answers.correct;

        let options = AnswerKey::ALL
            .iter()
            .map(|&key| OptionView {
                key,
                text: self.params.answers.text(key).to_string(),
                state: option_state(key, selected, correct, self.locked),
            })
            .collect();

        let feedback = (self.locked
            && self.params.settings.show_feedback
            && !self.params.settings.feedback.is_empty())
        .then(|| self.params.settings.feedback.clone());

        MultipleChoiceView {
            question: self.params.question.clone(),
            options,
            selected,
            locked: self.locked,
            can_submit: self.can_submit(),
            result,
            feedback,
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

fn option_state(
    key: AnswerKey,
    selected: Option<AnswerKey>,
    correct: AnswerKey,
    review: bool,
) -> OptionState {
    let is_selected = selected == Some(key);
    match (review, is_selected) {
        (false, true) => OptionState::Selected,
        (false, false) => OptionState::Neutral,
        (true, _) if key == correct => OptionState::Correct,
        (true, true) => OptionState::Incorrect,
        (true, false) => OptionState::Dimmed,
    }
}

impl<S> Evaluate for MultipleChoiceExercise<S> {
    type Answer = MultipleChoiceAnswer;

    fn evaluate(&self, answer: &MultipleChoiceAnswer) -> ScoreResult {
        ScoreResult::all_or_nothing(answer.selected == self.params.answers.correct)
    }
}
