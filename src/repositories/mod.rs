pub mod widget_session_repository;

pub use widget_session_repository::{InMemoryWidgetSessionRepository, WidgetSessionRepository};
