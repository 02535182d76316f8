pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod reminders;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use config::Config;
use reminders::ReminderGateway;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<Config>,
    pub ws_tx: Option<broadcast::Sender<String>>,
    pub reminders: Arc<dyn ReminderGateway>,
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Daily record: focus + journal
        .route("/api/day", get(handlers::days::get_day))
        .route("/api/day/focus", put(handlers::days::set_focus))
        .route("/api/day/journal", put(handlers::days::set_journal))
        // Per-day todos
        .route("/api/todos", get(handlers::todos::list_todos))
        .route("/api/todos", post(handlers::todos::create_todo))
        .route("/api/todos", put(handlers::todos::set_todos))
        .route("/api/todos/reconcile", post(handlers::todos::reconcile_todos))
        .route("/api/todos/:id", put(handlers::todos::update_todo))
        .route("/api/todos/:id", delete(handlers::todos::delete_todo))
        .route("/api/todos/:id/toggle", post(handlers::todos::toggle_todo))
        // Streaks
        .route("/api/streaks", get(handlers::streaks::list_streaks))
        .route("/api/streaks", post(handlers::streaks::create_streak))
        .route("/api/streaks/:id", put(handlers::streaks::update_streak))
        .route("/api/streaks/:id", delete(handlers::streaks::delete_streak))
        .route("/api/streaks/:id/complete", post(handlers::streaks::mark_complete))
        .route("/api/streaks/:id/week", get(handlers::streaks::get_week_progress))
        .route(
            "/api/streaks/completions/:id",
            delete(handlers::streaks::remove_completion),
        )
        // Focus label overrides
        .route("/api/focus-labels", get(handlers::labels::list_labels))
        .route("/api/focus-labels/:id", put(handlers::labels::set_label))
        .route("/api/focus-labels/:id", delete(handlers::labels::reset_label));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route("/ws", get(handlers::ws::ws_handler))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
