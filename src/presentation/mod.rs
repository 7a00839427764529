// Presentation layer - Terminal view and demo HTTP endpoints
pub mod app_state;
pub mod console_view;
pub mod handlers;
