use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{
    score_result::ScoreResult,
    widget_params::{MultipleChoiceParams, SortingParams},
};

/// Host-side record of one embedded widget and its learner's answer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct WidgetSession {
    pub id: String,
    pub widget: WidgetConfig,
    /// Opaque answer payload, passed to the widget untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_payload: Option<String>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResult>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "parameters", rename_all = "snake_case")]
pub enum WidgetConfig {
    Sorting(SortingParams),
    MultipleChoice(MultipleChoiceParams),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    Sorting,
    MultipleChoice,
}

impl WidgetConfig {
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetConfig::Sorting(_) => WidgetKind::Sorting,
            WidgetConfig::MultipleChoice(_) => WidgetKind::MultipleChoice,
        }
    }
}

impl WidgetSession {
    pub fn new(widget: WidgetConfig) -> Self {
        let now = Utc::now();
        WidgetSession {
            id: Uuid::new_v4().to_string(),
            widget,
            answer_payload: None,
            locked: false,
            result: None,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}
