use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::WidgetSession,
};

#[async_trait]
pub trait WidgetSessionRepository: Send + Sync {
    async fn create(&self, session: WidgetSession) -> AppResult<WidgetSession>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<WidgetSession>>;
    /// Replaces a stored session. A locked session is never written back unlocked.
    async fn update(&self, session: WidgetSession) -> AppResult<WidgetSession>;
}

/// Process-local session storage; one writer per session at a time.
#[derive(Clone, Default)]
pub struct InMemoryWidgetSessionRepository {
    sessions: Arc<RwLock<HashMap<String, WidgetSession>>>,
}

impl InMemoryWidgetSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WidgetSessionRepository for InMemoryWidgetSessionRepository {
    async fn create(&self, session: WidgetSession) -> AppResult<WidgetSession> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(AppError::ValidationError(format!(
                "Widget session with id '{}' already exists",
                session.id
            )));
        }

        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<WidgetSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }

    async fn update(&self, session: WidgetSession) -> AppResult<WidgetSession> {
        let mut sessions = self.sessions.write().await;
        let Some(stored) = sessions.get(&session.id) else {
            return Err(AppError::NotFound(format!(
                "Widget session with id '{}' not found",
                session.id
            )));
        };
        if stored.locked && !session.locked {
            return Err(AppError::Locked(format!(
                "Widget session with id '{}' was already submitted",
                session.id
            )));
        }

        sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }
}
