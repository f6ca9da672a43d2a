use async_graphql::{Enum, SimpleObject, Union};
use serde::Serialize;

use crate::models::domain::{AnswerKey, OrderDirection, ScoreResult, WidgetKind};

/// One value in the learner's arrangement.
#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct SortedItem {
    pub slot: u32,
    pub value: f64,
    /// Canonical position of this item, distinguishing repeated values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct SortingView {
    pub question: String,
    pub order_type: OrderDirection,
    pub items: Vec<SortedItem>,
    pub has_content: bool,
    pub locked: bool,
    pub can_submit: bool,
    /// Review mode only: verdict for each boundary between neighbouring items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_feedback: Option<Vec<bool>>,
    /// Review mode only: the fully correct order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_order: Option<Vec<f64>>,
    /// Review mode only: which positions already hold their expected value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_feedback: Option<Vec<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "camelCase")]
pub enum OptionState {
    Neutral,
    Selected,
    Correct,
    Incorrect,
    Dimmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
pub struct OptionView {
    pub key: AnswerKey,
    pub text: String,
    pub state: OptionState,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceView {
    pub question: String,
    pub options: Vec<OptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<AnswerKey>,
    pub locked: bool,
    pub can_submit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Union)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WidgetView {
    Sorting(SortingView),
    MultipleChoice(MultipleChoiceView),
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSessionResponse {
    pub id: String,
    pub kind: WidgetKind,
    pub view: WidgetView,
}

#[derive(Debug, Clone, PartialEq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: String,
    pub result: ScoreResult,
    pub view: WidgetView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_view_is_tagged_by_kind() {
        let view = WidgetView::MultipleChoice(MultipleChoiceView {
            question: "Pick".to_string(),
            options: vec![],
            selected: Some(AnswerKey::B),
            locked: false,
            can_submit: true,
            result: None,
            feedback: None,
        });

        let json = serde_json::to_value(&view).expect("view should serialize");
        assert_eq!(json["kind"], "multiple-choice");
        assert_eq!(json["selected"], "B");
        assert_eq!(json["canSubmit"], true);
        assert!(json.get("result").is_none());
    }

    #[test]
    fn sorting_view_omits_review_fields_in_practice_mode() {
        let view = SortingView {
            question: "Sort".to_string(),
            order_type: OrderDirection::Ascending,
            items: vec![SortedItem {
                slot: 0,
                value: 2.0,
                origin: Some(1),
            }],
            has_content: true,
            locked: false,
            can_submit: true,
            pair_feedback: None,
            expected_order: None,
            position_feedback: None,
            result: None,
            feedback: None,
        };

        let json = serde_json::to_value(&view).expect("view should serialize");
        assert!(json.get("pairFeedback").is_none());
        assert_eq!(json["orderType"], "ascending");
        assert_eq!(json["items"][0]["origin"], 1);
    }
}
