use serde::{Deserialize, Serialize};

use crate::{
    errors::{AppError, AppResult},
    models::domain::AnswerState,
};

/// Relocation of one item: remove it at `from`, then insert it at `to` in the
/// shortened list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Splices `items[from]` into position `to`. The input slice is not touched.
pub fn apply_move<T: Clone>(items: &[T], mv: Move) -> AppResult<Vec<T>> {
    let Move { from, to } = mv;
    if from >= items.len() || to >= items.len() {
        return Err(AppError::InvalidMove(format!(
            "move {} -> {} is outside an arrangement of {} items",
            from,
            to,
            items.len()
        )));
    }

    let mut moved = items.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// Applies `mv` to the learner's arrangement, carrying item tags along with the
/// values. `initial_order` is never changed by a move.
pub fn apply_move_to_state(state: &AnswerState, mv: Move) -> AppResult<AnswerState> {
    let sorted_numbers = apply_move(&state.sorted_numbers, mv)?;
    let current_order = if state.current_order.len() == state.sorted_numbers.len() {
        apply_move(&state.current_order, mv)?
    } else {
        Vec::new()
    };

    Ok(AnswerState {
        initial_order: state.initial_order.clone(),
        sorted_numbers,
        current_order,
    })
}

/// Pointer bookkeeping for a drag in progress.
///
/// Lives only in the rendering layer; nothing is committed until [`finish`]
/// yields a [`Move`].
///
/// [`finish`]: DragSession::finish
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<usize>,
    hover: Option<usize>,
}

impl DragSession {
    pub fn begin(index: usize) -> Self {
        Self {
            dragged: Some(index),
            hover: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn dragged(&self) -> Option<usize> {
        self.dragged
    }

    pub fn hover_target(&self) -> Option<usize> {
        self.hover
    }

    /// `None` when the pointer leaves every valid drop target.
    pub fn hover_over(&mut self, target: Option<usize>) {
        if self.dragged.is_some() {
            self.hover = target;
        }
    }

    /// Ends the drag. Dropping outside a target, or back onto the dragged item,
    /// yields no move.
    pub fn finish(self) -> Option<Move> {
        match (self.dragged, self.hover) {
            (Some(from), Some(to)) if from != to => Some(Move::new(from, to)),
            _ => None,
        }
    }
}
