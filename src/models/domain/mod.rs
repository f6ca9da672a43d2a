pub mod answer_state;
pub mod order_direction;
pub mod score_result;
pub mod sequence;
pub mod widget_params;
pub mod widget_session;
pub use answer_state::AnswerState;
pub use order_direction::OrderDirection;
pub use score_result::ScoreResult;
pub use sequence::{CanonicalSequence, Permutation};
pub use widget_params::{AnswerKey, MultipleChoiceAnswer, MultipleChoiceParams, SortingParams};
pub use widget_session::{WidgetConfig, WidgetKind, WidgetSession};
