use async_graphql::{Enum, InputObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::order_direction::OrderDirection;

/// Author configuration for the drag-to-reorder sorting widget.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, InputObject, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortingParams {
    #[validate(length(min = 1, max = 500))]
    pub question: String,

    /// Raw token list, e.g. `"5, 2, 8"`. Tokens that are not numbers are dropped.
    #[validate(length(max = 2000))]
    pub numbers: String,

    #[serde(default)]
    #[graphql(default)]
    pub order_type: OrderDirection,

    #[serde(default)]
    #[graphql(default)]
    #[validate(nested)]
    pub settings: SortingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, InputObject, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SortingSettings {
    pub show_feedback: bool,

    #[validate(length(max = 1000))]
    pub feedback_correct: String,

    #[validate(length(max = 1000))]
    pub feedback_incorrect: String,
}

impl Default for SortingSettings {
    fn default() -> Self {
        Self {
            show_feedback: true,
            feedback_correct: "Correct! The numbers are in order.".to_string(),
            feedback_incorrect: "Not quite. Check the highlighted pairs.".to_string(),
        }
    }
}

/// Author configuration for the four-option multiple-choice widget.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, InputObject, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceParams {
    #[validate(length(min = 1, max = 500))]
    pub question: String,

    #[validate(nested)]
    pub answers: AnswerChoices,

    #[serde(default)]
    #[graphql(default)]
    #[validate(nested)]
    pub settings: MultipleChoiceSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, InputObject, JsonSchema)]
pub struct AnswerChoices {
    #[validate(length(max = 500))]
    pub a: String,
    #[validate(length(max = 500))]
    pub b: String,
    #[validate(length(max = 500))]
    pub c: String,
    #[validate(length(max = 500))]
    pub d: String,

    #[serde(default)]
    #[graphql(default)]
    pub correct: AnswerKey,
}

impl AnswerChoices {
    pub fn text(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::A => &self.a,
            AnswerKey::B => &self.b,
            AnswerKey::C => &self.c,
            AnswerKey::D => &self.d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, InputObject, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MultipleChoiceSettings {
    pub show_feedback: bool,

    /// Explanation revealed in review mode.
    #[validate(length(max = 1000))]
    pub feedback: String,
}

impl Default for MultipleChoiceSettings {
    fn default() -> Self {
        Self {
            show_feedback: true,
            feedback: String::new(),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, JsonSchema,
)]
pub enum AnswerKey {
    #[default]
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];
}

/// What a learner submits for a multiple-choice widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MultipleChoiceAnswer {
    pub selected: AnswerKey,
}
