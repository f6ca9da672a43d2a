use std::sync::Arc;

use crate::{
    config::Config,
    repositories::InMemoryWidgetSessionRepository,
    services::WidgetSessionService,
};

#[derive(Clone)]
pub struct AppState {
    pub widget_service: Arc<WidgetSessionService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let repository = Arc::new(InMemoryWidgetSessionRepository::new());
        let widget_service = Arc::new(WidgetSessionService::new(
            repository,
            config.deterministic_shuffle,
        ));

        Self {
            widget_service,
            config: Arc::new(config),
        }
    }
}
