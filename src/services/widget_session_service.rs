use std::{collections::HashMap, sync::Arc};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::{Mutex, OwnedMutexGuard};
use validator::Validate;

use crate::{
    engine::{normalize, seeded_rng, Evaluate, Move, PayloadSlot},
    errors::{AppError, AppResult},
    models::{
        domain::{
            AnswerKey, MultipleChoiceParams, ScoreResult, SortingParams, WidgetConfig,
            WidgetKind, WidgetSession,
        },
        dto::response::{SubmissionResponse, WidgetSessionResponse, WidgetView},
    },
    repositories::WidgetSessionRepository,
    widgets::{ExerciseEvent, MultipleChoiceExercise, SortingExercise},
};

type Sorting = SortingExercise<PayloadSlot, StdRng>;
type MultipleChoice = MultipleChoiceExercise<PayloadSlot>;

enum LoadedWidget {
    Sorting(Sorting),
    MultipleChoice(MultipleChoice),
}

impl LoadedWidget {
    fn view(&self, result: Option<ScoreResult>) -> WidgetView {
        match self {
            LoadedWidget::Sorting(exercise) => WidgetView::Sorting(exercise.view(result)),
            LoadedWidget::MultipleChoice(exercise) => {
                WidgetView::MultipleChoice(exercise.view(result))
            }
        }
    }

    fn into_payload(self) -> Option<String> {
        match self {
            LoadedWidget::Sorting(exercise) => exercise.into_store().into_payload(),
            LoadedWidget::MultipleChoice(exercise) => exercise.into_store().into_payload(),
        }
    }
}

/// Plays the hosting runtime for embedded widgets: keeps parameters, answer
/// payloads, lock state and results per session.
///
/// Every read-modify-write of a session runs under that session's guard, so a
/// submit and a concurrent move or second submit are applied one after another.
pub struct WidgetSessionService {
    repository: Arc<dyn WidgetSessionRepository>,
    deterministic_shuffle: bool,
    session_guards: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl WidgetSessionService {
    pub fn new(repository: Arc<dyn WidgetSessionRepository>, deterministic_shuffle: bool) -> Self {
        Self {
            repository,
            deterministic_shuffle,
            session_guards: Mutex::new(HashMap::new()),
        }
    }

    pub async fn create_sorting(&self, params: SortingParams) -> AppResult<WidgetSessionResponse> {
        params.validate()?;
        self.create(WidgetConfig::Sorting(params)).await
    }

    pub async fn create_multiple_choice(
        &self,
        params: MultipleChoiceParams,
    ) -> AppResult<WidgetSessionResponse> {
        params.validate()?;
        self.create(WidgetConfig::MultipleChoice(params)).await
    }

    async fn create(&self, widget: WidgetConfig) -> AppResult<WidgetSessionResponse> {
        let mut session = WidgetSession::new(widget);
        let loaded = self.open(&session)?;
        let view = loaded.view(None);
        session.answer_payload = loaded.into_payload();

        let session = self.repository.create(session).await?;
        log::info!(
            "Created {:?} widget session {}",
            session.widget.kind(),
            session.id
        );

        Ok(WidgetSessionResponse {
            id: session.id,
            kind: session.widget.kind(),
            view,
        })
    }

    pub async fn get_view(&self, id: &str) -> AppResult<WidgetSessionResponse> {
        let _guard = self.lock_session(id).await;
        let session = self.find_session(id).await?;
        let loaded = self.open(&session)?;
        let view = loaded.view(session.result);
        let session = self.store_payload(session, loaded.into_payload()).await?;

        Ok(WidgetSessionResponse {
            id: session.id,
            kind: session.widget.kind(),
            view,
        })
    }

    /// Applies an author edit. The learner's arrangement is kept when the values
    /// are unchanged and re-drawn otherwise (unless the widget is locked).
    pub async fn update_sorting_params(
        &self,
        id: &str,
        params: SortingParams,
    ) -> AppResult<WidgetSessionResponse> {
        params.validate()?;
        let _guard = self.lock_session(id).await;
        let mut session = self.find_session(id).await?;
        let LoadedWidget::Sorting(mut exercise) = self.open(&session)? else {
            return Err(wrong_kind(&session, WidgetKind::Sorting));
        };

        exercise.handle_event(ExerciseEvent::ParametersChanged(params.clone()))?;
        let view = WidgetView::Sorting(exercise.view(session.result));
        session.widget = WidgetConfig::Sorting(params);
        session.answer_payload = exercise.into_store().into_payload();
        session.touch();
        let session = self.repository.update(session).await?;

        Ok(WidgetSessionResponse {
            id: session.id,
            kind: WidgetKind::Sorting,
            view,
        })
    }

    pub async fn move_item(&self, id: &str, mv: Move) -> AppResult<WidgetSessionResponse> {
        let _guard = self.lock_session(id).await;
        let session = self.find_session(id).await?;
        let LoadedWidget::Sorting(mut exercise) = self.open(&session)? else {
            return Err(wrong_kind(&session, WidgetKind::Sorting));
        };

        exercise.apply_move(mv)?;
        let view = WidgetView::Sorting(exercise.view(session.result));
        let session = self
            .store_payload(session, exercise.into_store().into_payload())
            .await?;

        Ok(WidgetSessionResponse {
            id: session.id,
            kind: WidgetKind::Sorting,
            view,
        })
    }

    pub async fn select_option(
        &self,
        id: &str,
        key: AnswerKey,
    ) -> AppResult<WidgetSessionResponse> {
        let _guard = self.lock_session(id).await;
        let session = self.find_session(id).await?;
        let LoadedWidget::MultipleChoice(mut exercise) = self.open(&session)? else {
            return Err(wrong_kind(&session, WidgetKind::MultipleChoice));
        };

        if !exercise.select(key)? {
            log::debug!("Selection ignored for locked session {}", session.id);
        }
        let view = WidgetView::MultipleChoice(exercise.view(session.result));
        let session = self
            .store_payload(session, exercise.into_store().into_payload())
            .await?;

        Ok(WidgetSessionResponse {
            id: session.id,
            kind: WidgetKind::MultipleChoice,
            view,
        })
    }

    /// Evaluates the stored answer once and locks the session.
    pub async fn submit(&self, id: &str) -> AppResult<SubmissionResponse> {
        let _guard = self.lock_session(id).await;
        let mut session = self.find_session(id).await?;
        if session.locked {
            return Err(AppError::Locked(format!(
                "widget session '{}' was already submitted",
                session.id
            )));
        }

        let (result, view, payload) = match self.open(&session)? {
            LoadedWidget::Sorting(mut exercise) => {
                let result = exercise.evaluate_current();
                exercise.handle_event(ExerciseEvent::LockChanged(true))?;
                let view = WidgetView::Sorting(exercise.view(Some(result)));
                (result, view, exercise.into_store().into_payload())
            }
            LoadedWidget::MultipleChoice(mut exercise) => {
                let answer = exercise.answer().ok_or_else(|| {
                    AppError::ValidationError("no option has been selected".to_string())
                })?;
                let result = exercise.evaluate(&answer);
                exercise.set_locked(true);
                let view = WidgetView::MultipleChoice(exercise.view(Some(result)));
                (result, view, exercise.into_store().into_payload())
            }
        };

        session.locked = true;
        session.result = Some(result);
        session.answer_payload = payload;
        session.touch();
        let session = self.repository.update(session).await?;
        log::info!(
            "Widget session {} submitted: score {}/{}",
            session.id,
            result.score,
            result.max_score
        );

        Ok(SubmissionResponse {
            id: session.id,
            result,
            view,
        })
    }

    /// JSON Schema describing the parameters a widget kind accepts.
    pub fn parameter_schema(kind: WidgetKind) -> AppResult<serde_json::Value> {
        let schema = match kind {
            WidgetKind::Sorting => schemars::schema_for!(SortingParams),
            WidgetKind::MultipleChoice => schemars::schema_for!(MultipleChoiceParams),
        };
        Ok(serde_json::to_value(schema)?)
    }

    async fn lock_session(&self, id: &str) -> OwnedMutexGuard<()> {
        let guard = {
            let mut guards = self.session_guards.lock().await;
            Arc::clone(guards.entry(id.to_string()).or_default())
        };
        guard.lock_owned().await
    }

    async fn find_session(&self, id: &str) -> AppResult<WidgetSession> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Widget session '{}' not found", id)))
    }

    fn open(&self, session: &WidgetSession) -> AppResult<LoadedWidget> {
        let slot = PayloadSlot::new(session.answer_payload.clone());
        match &session.widget {
            WidgetConfig::Sorting(params) => {
                let rng = if self.deterministic_shuffle {
                    seeded_rng(&session.id, &normalize(&params.numbers))
                } else {
                    StdRng::from_os_rng()
                };
                let exercise = SortingExercise::load(params.clone(), session.locked, slot, rng)?;
                Ok(LoadedWidget::Sorting(exercise))
            }
            WidgetConfig::MultipleChoice(params) => Ok(LoadedWidget::MultipleChoice(
                MultipleChoiceExercise::load(params.clone(), session.locked, slot),
            )),
        }
    }

    async fn store_payload(
        &self,
        mut session: WidgetSession,
        payload: Option<String>,
    ) -> AppResult<WidgetSession> {
        if session.answer_payload == payload {
            return Ok(session);
        }
        session.answer_payload = payload;
        session.touch();
        self.repository.update(session).await
    }
}

fn wrong_kind(session: &WidgetSession, expected: WidgetKind) -> AppError {
    AppError::ValidationError(format!(
        "widget session '{}' is {:?}, not {:?}",
        session.id,
        session.widget.kind(),
        expected
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{
            domain::{
                widget_params::{AnswerChoices, MultipleChoiceSettings, SortingSettings},
                AnswerState, OrderDirection,
            },
            dto::response::OptionState,
        },
        repositories::InMemoryWidgetSessionRepository,
    };

    fn service() -> WidgetSessionService {
        WidgetSessionService::new(Arc::new(InMemoryWidgetSessionRepository::new()), true)
    }

    fn sorting_params(numbers: &str) -> SortingParams {
        SortingParams {
            question: "Order these".to_string(),
            numbers: numbers.to_string(),
            order_type: OrderDirection::Ascending,
            settings: SortingSettings::default(),
        }
    }

    fn choice_params() -> MultipleChoiceParams {
        MultipleChoiceParams {
            question: "Capital of France?".to_string(),
            answers: AnswerChoices {
                a: "Lyon".to_string(),
                b: "Paris".to_string(),
                c: "Nice".to_string(),
                d: "Lille".to_string(),
                correct: AnswerKey::B,
            },
            settings: MultipleChoiceSettings::default(),
        }
    }

    fn sorting_view(view: &WidgetView) -> &crate::models::dto::response::SortingView {
        match view {
            WidgetView::Sorting(view) => view,
            other => panic!("expected sorting view, got {:?}", other),
        }
    }

    fn values(view: &WidgetView) -> Vec<f64> {
        sorting_view(view).items.iter().map(|item| item.value).collect()
    }

    /// Moves items one by one until the arrangement is ascending.
    async fn sort_ascending(service: &WidgetSessionService, id: &str) {
        let mut current = values(&service.get_view(id).await.expect("view").view);
        let mut target = current.clone();
        target.sort_by(f64::total_cmp);

        for slot in 0..target.len() {
            let from = (slot..current.len())
                .find(|&i| current[i] == target[slot])
                .expect("value present");
            let response = service
                .move_item(id, Move::new(from, slot))
                .await
                .expect("move");
            current = values(&response.view);
        }
        assert_eq!(current, target);
    }

    #[actix_rt::test]
    async fn create_sorting_persists_initial_arrangement() {
        let service = service();

        let created = service
            .create_sorting(sorting_params("5, 2, 8"))
            .await
            .expect("create");
        let reloaded = service.get_view(&created.id).await.expect("view");

        assert_eq!(created.kind, WidgetKind::Sorting);
        assert_eq!(values(&created.view), values(&reloaded.view));
        assert_eq!(values(&created.view).len(), 3);
    }

    #[actix_rt::test]
    async fn create_rejects_invalid_params() {
        let mut params = sorting_params("1, 2");
        params.question = String::new();

        let err = service().create_sorting(params).await.expect_err("empty question");

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[actix_rt::test]
    async fn sorted_submission_is_correct_and_locks() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("4, 1, 3, 2"))
            .await
            .expect("create");

        sort_ascending(&service, &created.id).await;
        let submission = service.submit(&created.id).await.expect("submit");

        assert!(submission.result.is_correct);
        assert_eq!(submission.result.score, 100);
        let view = sorting_view(&submission.view);
        assert!(view.locked);
        assert_eq!(view.pair_feedback, Some(vec![true, true, true]));
    }

    #[actix_rt::test]
    async fn locked_session_rejects_moves_and_resubmission() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("3, 1, 2"))
            .await
            .expect("create");
        service.submit(&created.id).await.expect("submit");
        let before = service.get_view(&created.id).await.expect("view");

        let move_err = service
            .move_item(&created.id, Move::new(0, 1))
            .await
            .expect_err("locked");
        let submit_err = service.submit(&created.id).await.expect_err("locked");

        assert!(matches!(move_err, AppError::Locked(_)));
        assert!(matches!(submit_err, AppError::Locked(_)));
        let after = service.get_view(&created.id).await.expect("view");
        assert_eq!(values(&before.view), values(&after.view));
    }

    #[actix_rt::test]
    async fn review_view_keeps_submitted_result() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("3, 1, 2"))
            .await
            .expect("create");
        let submission = service.submit(&created.id).await.expect("submit");

        let view = service.get_view(&created.id).await.expect("view");

        assert_eq!(sorting_view(&view.view).result, Some(submission.result));
        assert!(sorting_view(&view.view).feedback.is_some());
    }

    #[actix_rt::test]
    async fn parameter_edit_redraws_arrangement_for_new_values() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("5, 2, 8"))
            .await
            .expect("create");

        let updated = service
            .update_sorting_params(&created.id, sorting_params("5, 2, 8, 1"))
            .await
            .expect("update");

        let mut shown = values(&updated.view);
        shown.sort_by(f64::total_cmp);
        assert_eq!(shown, vec![1.0, 2.0, 5.0, 8.0]);
    }

    #[actix_rt::test]
    async fn parameter_edit_with_same_values_keeps_progress() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("5, 2, 8"))
            .await
            .expect("create");
        let moved = service
            .move_item(&created.id, Move::new(2, 0))
            .await
            .expect("move");

        let updated = service
            .update_sorting_params(&created.id, sorting_params("5 2 8"))
            .await
            .expect("update");

        assert_eq!(values(&moved.view), values(&updated.view));
    }

    #[actix_rt::test]
    async fn invalid_move_is_rejected_and_state_kept() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("5, 2, 8"))
            .await
            .expect("create");

        let err = service
            .move_item(&created.id, Move::new(0, 7))
            .await
            .expect_err("out of range");

        assert!(matches!(err, AppError::InvalidMove(_)));
        let view = service.get_view(&created.id).await.expect("view");
        assert_eq!(values(&view.view), values(&created.view));
    }

    #[actix_rt::test]
    async fn empty_sorting_submission_scores_zero() {
        let service = service();
        let created = service
            .create_sorting(sorting_params("nothing numeric"))
            .await
            .expect("create");

        assert!(!sorting_view(&created.view).has_content);
        let submission = service.submit(&created.id).await.expect("submit");

        assert_eq!(submission.result, ScoreResult::zero());
    }

    #[actix_rt::test]
    async fn multiple_choice_flow_scores_selection() {
        let service = service();
        let created = service
            .create_multiple_choice(choice_params())
            .await
            .expect("create");

        let no_selection = service.submit(&created.id).await.expect_err("nothing selected");
        assert!(matches!(no_selection, AppError::ValidationError(_)));

        service
            .select_option(&created.id, AnswerKey::B)
            .await
            .expect("select");
        let submission = service.submit(&created.id).await.expect("submit");

        assert_eq!(submission.result, ScoreResult::all_or_nothing(true));
        let WidgetView::MultipleChoice(view) = submission.view else {
            panic!("expected multiple-choice view");
        };
        assert_eq!(view.options[1].state, OptionState::Correct);
    }

    #[actix_rt::test]
    async fn locked_multiple_choice_ignores_selection() {
        let service = service();
        let created = service
            .create_multiple_choice(choice_params())
            .await
            .expect("create");
        service
            .select_option(&created.id, AnswerKey::A)
            .await
            .expect("select");
        service.submit(&created.id).await.expect("submit");

        let response = service
            .select_option(&created.id, AnswerKey::B)
            .await
            .expect("select is ignored, not an error");

        let WidgetView::MultipleChoice(view) = response.view else {
            panic!("expected multiple-choice view");
        };
        assert_eq!(view.selected, Some(AnswerKey::A));
    }

    #[actix_rt::test]
    async fn operations_check_widget_kind() {
        let service = service();
        let created = service
            .create_multiple_choice(choice_params())
            .await
            .expect("create");

        let err = service
            .move_item(&created.id, Move::new(0, 1))
            .await
            .expect_err("not a sorting widget");

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    /// Hands control back to the runtime between reading a session and returning it.
    struct YieldingRepository(InMemoryWidgetSessionRepository);

    #[async_trait::async_trait]
    impl WidgetSessionRepository for YieldingRepository {
        async fn create(&self, session: WidgetSession) -> AppResult<WidgetSession> {
            self.0.create(session).await
        }

        async fn find_by_id(&self, id: &str) -> AppResult<Option<WidgetSession>> {
            let found = self.0.find_by_id(id).await;
            tokio::task::yield_now().await;
            found
        }

        async fn update(&self, session: WidgetSession) -> AppResult<WidgetSession> {
            self.0.update(session).await
        }
    }

    fn yielding_service() -> (WidgetSessionService, InMemoryWidgetSessionRepository) {
        let storage = InMemoryWidgetSessionRepository::new();
        let service =
            WidgetSessionService::new(Arc::new(YieldingRepository(storage.clone())), true);
        (service, storage)
    }

    #[actix_rt::test]
    async fn concurrent_move_cannot_unlock_a_submission() {
        let (service, storage) = yielding_service();
        let id = service
            .create_sorting(sorting_params("5, 2, 8, 1"))
            .await
            .expect("create")
            .id;

        let (moved, submitted) =
            tokio::join!(service.move_item(&id, Move::new(0, 3)), service.submit(&id));

        assert!(matches!(moved, Ok(_) | Err(AppError::Locked(_))));
        let submitted = submitted.expect("submit");
        let stored = storage
            .find_by_id(&id)
            .await
            .expect("lookup")
            .expect("session exists");
        assert!(stored.locked);
        assert_eq!(stored.result, Some(submitted.result));
    }

    #[actix_rt::test]
    async fn concurrent_submits_evaluate_once() {
        let (service, storage) = yielding_service();
        let id = service
            .create_multiple_choice(choice_params())
            .await
            .expect("create")
            .id;
        service.select_option(&id, AnswerKey::B).await.expect("select");

        let (first, second) = tokio::join!(service.submit(&id), service.submit(&id));

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|outcome| matches!(outcome, Err(AppError::Locked(_)))));
        let stored = storage
            .find_by_id(&id)
            .await
            .expect("lookup")
            .expect("session exists");
        assert!(stored.locked);
        assert_eq!(stored.result, Some(ScoreResult::all_or_nothing(true)));
    }

    #[actix_rt::test]
    async fn unknown_session_is_not_found() {
        let err = service().get_view("missing").await.expect_err("missing");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_rt::test]
    async fn deterministic_shuffle_is_stable_for_a_session() {
        let repository = Arc::new(InMemoryWidgetSessionRepository::new());
        let service = WidgetSessionService::new(repository.clone(), true);
        let created = service
            .create_sorting(sorting_params("9, 4, 7, 1, 3, 6"))
            .await
            .expect("create");

        let mut session = repository
            .find_by_id(&created.id)
            .await
            .expect("lookup")
            .expect("session exists");
        let original = session.answer_payload.take();
        repository.update(session).await.expect("clear payload");

        let redrawn = service.get_view(&created.id).await.expect("view");
        let original = AnswerState::from_payload(original.as_deref().expect("payload"))
            .expect("payload parses");
        assert_eq!(values(&redrawn.view), original.sorted_numbers);
    }

    #[test]
    fn parameter_schema_describes_fields() {
        let schema =
            WidgetSessionService::parameter_schema(WidgetKind::Sorting).expect("schema");
        let properties = &schema["properties"];

        assert!(properties.get("numbers").is_some());
        assert!(properties.get("orderType").is_some());

        let schema =
            WidgetSessionService::parameter_schema(WidgetKind::MultipleChoice).expect("schema");
        assert!(schema["properties"].get("answers").is_some());
    }
}
