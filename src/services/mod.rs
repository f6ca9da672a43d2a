pub mod widget_session_service;

pub use widget_session_service::WidgetSessionService;
