//! Ordering-exercise engine: parse, shuffle, persist, move and score.

pub mod answer_store;
pub mod evaluation;
pub mod move_engine;
pub mod normalizer;
pub mod scorer;
pub mod shuffle;

pub use answer_store::{reconcile, AnswerStore, PayloadSlot, Reconciliation};
pub use evaluation::Evaluate;
pub use move_engine::{apply_move, apply_move_to_state, DragSession, Move};
pub use normalizer::normalize;
pub use scorer::{adjacency_report, position_mask, score_arrangement, AdjacencyReport};
pub use shuffle::{seeded_rng, shuffle};
