use rand::Rng;

use crate::{
    engine::shuffle::shuffle,
    errors::AppResult,
    models::domain::{AnswerState, CanonicalSequence},
};

/// Get/set pair the host supplies for persisting a widget's answer.
///
/// Payloads are opaque strings; the host stores whatever it is given and hands
/// the last value back on reload.
#[cfg_attr(test, mockall::automock)]
pub trait AnswerStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, payload: String);
}

/// Single in-memory answer slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PayloadSlot {
    payload: Option<String>,
}

impl PayloadSlot {
    pub fn new(payload: Option<String>) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn into_payload(self) -> Option<String> {
        self.payload
    }
}

impl AnswerStore for PayloadSlot {
    fn load(&self) -> Option<String> {
        self.payload.clone()
    }

    fn save(&mut self, payload: String) {
        self.payload = Some(payload);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Reconciliation {
    /// Persisted state still matches the sequence and was kept as is.
    Reused(AnswerState),
    /// A fresh shuffle was drawn and persisted.
    Reinitialized(AnswerState),
    /// No usable state: the sequence is empty, or the exercise is locked and
    /// nothing valid was persisted.
    Inert,
}

impl Reconciliation {
    pub fn state(&self) -> Option<&AnswerState> {
        match self {
            Reconciliation::Reused(state) | Reconciliation::Reinitialized(state) => Some(state),
            Reconciliation::Inert => None,
        }
    }

    pub fn into_state(self) -> Option<AnswerState> {
        match self {
            Reconciliation::Reused(state) | Reconciliation::Reinitialized(state) => Some(state),
            Reconciliation::Inert => None,
        }
    }
}

/// Decides whether the persisted answer can be reused for `sequence`.
///
/// Compatible state is reused verbatim. Missing, malformed or stale state is
/// replaced by a fresh shuffle, unless the exercise is locked, in which case the
/// store is left untouched.
pub fn reconcile<S, R>(
    store: &mut S,
    sequence: &CanonicalSequence,
    locked: bool,
    rng: &mut R,
) -> AppResult<Reconciliation>
where
    S: AnswerStore + ?Sized,
    R: Rng + ?Sized,
{
    if sequence.is_empty() {
        log::debug!("Sequence is empty, nothing to reconcile");
        return Ok(Reconciliation::Inert);
    }

    if let Some(state) = store.load().as_deref().and_then(AnswerState::from_payload) {
        if state.is_compatible_with(sequence) {
            log::debug!("Reusing persisted arrangement of {} values", state.len());
            return Ok(Reconciliation::Reused(state.with_resolved_origins(sequence)));
        }
        log::warn!(
            "Discarding stale answer state: {} values persisted, {} expected",
            state.len(),
            sequence.len()
        );
    }

    if locked {
        log::debug!("Exercise is locked, leaving answer store untouched");
        return Ok(Reconciliation::Inert);
    }

    let (initial_order, arrangement) = shuffle(sequence, rng);
    let state = AnswerState::from_shuffle(initial_order, arrangement);
    store.save(state.to_payload()?);
    log::debug!("Initialized new arrangement of {} values", state.len());

    Ok(Reconciliation::Reinitialized(state))
}
