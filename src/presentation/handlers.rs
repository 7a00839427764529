// HTTP request handlers for the demo backend
use crate::domain::weather::Stats;
use crate::infrastructure::reading_store::HistoryRecord;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const DEFAULT_HISTORY_HOURS: i64 = 24;
const STATS_WINDOW_HOURS: i64 = 24;

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub hours: Option<i64>,
}

pub fn demo_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/latest", get(latest_reading))
        .route("/api/history", get(reading_history))
        .route("/api/stats", get(reading_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Newest reading, or 404 before the first one is stored
pub async fn latest_reading(State(state): State<Arc<AppState>>) -> Response {
    match state.store.latest().await {
        Some(reading) => Json(reading).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "No data available" })),
        )
            .into_response(),
    }
}

/// Readings from the last `hours` hours, oldest first
pub async fn reading_history(
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<HistoryRecord>> {
    let hours = query.hours.unwrap_or(DEFAULT_HISTORY_HOURS);
    Json(state.store.history_since(hours_ago(hours)).await)
}

/// Aggregates over the last day
pub async fn reading_stats(State(state): State<Arc<AppState>>) -> Json<Stats> {
    Json(state.store.stats_since(hours_ago(STATS_WINDOW_HOURS)).await)
}

// Saturates instead of panicking on absurd `hours` values.
fn hours_ago(hours: i64) -> DateTime<Utc> {
    Duration::try_hours(hours)
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .unwrap_or(if hours > 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}
