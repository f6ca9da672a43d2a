#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{
        widget_params::{AnswerChoices, MultipleChoiceSettings, SortingSettings},
        AnswerKey, MultipleChoiceParams, OrderDirection, SortingParams,
    };

    /// Ascending sorting widget over the given raw numbers
    pub fn sorting_params(numbers: &str) -> SortingParams {
        SortingParams {
            question: "Arrange the numbers from smallest to largest".to_string(),
            numbers: numbers.to_string(),
            order_type: OrderDirection::Ascending,
            settings: SortingSettings::default(),
        }
    }

    /// Four-option question whose correct answer is B
    pub fn multiple_choice_params() -> MultipleChoiceParams {
        MultipleChoiceParams {
            question: "Which of these is an even number?".to_string(),
            answers: AnswerChoices {
                a: "7".to_string(),
                b: "8".to_string(),
                c: "9".to_string(),
                d: "11".to_string(),
                correct: AnswerKey::B,
            },
            settings: MultipleChoiceSettings::default(),
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use crate::{app_state::AppState, config::Config};

    /// Application state backed by in-memory storage and deterministic shuffles
    pub fn test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::test_config()))
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use validator::Validate;

    #[test]
    fn test_fixtures_sorting_params() {
        let params = sorting_params("3, 1, 2");
        assert_eq!(params.numbers, "3, 1, 2");
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_fixtures_multiple_choice_params() {
        let params = multiple_choice_params();
        assert_eq!(params.answers.text(params.answers.correct), "8");
        assert!(params.validate().is_ok());
    }
}
