//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db;
use crate::errors::IndexerError;
use crate::events::{EventKind, EventRecord};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(get_all_events))
        .route("/tasks/:id/events", get(get_task_events))
        .route("/actors/:address/events", get(get_actor_events))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// Stored event type, e.g. `task_created`.
    pub kind: Option<String>,
}

#[derive(Serialize)]
pub struct TaskEventsResponse {
    pub task_id: u64,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct ActorEventsResponse {
    pub actor: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error; unknown filters are the client's fault, the rest is ours.
#[derive(Debug)]
pub struct ApiError(IndexerError);

impl From<IndexerError> for ApiError {
    fn from(err: IndexerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            IndexerError::UnknownKind(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events[?kind=<event_type>]`
pub async fn get_all_events(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<AllEventsResponse>, ApiError> {
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<EventKind>)
        .transpose()?;
    let events = db::get_all_events(&state.pool, kind).await?;
    Ok(Json(AllEventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /tasks/:id/events`
///
/// Creation and every update of one task, oldest first.
pub async fn get_task_events(
    State(state): State<Arc<ApiState>>,
    Path(task_id): Path<u64>,
) -> Result<Json<TaskEventsResponse>, ApiError> {
    let events = db::get_events_for_task(&state.pool, &task_id.to_string()).await?;
    Ok(Json(TaskEventsResponse {
        task_id,
        count: events.len(),
        events,
    }))
}

/// `GET /actors/:address/events`
pub async fn get_actor_events(
    State(state): State<Arc<ApiState>>,
    Path(actor): Path<String>,
) -> Result<Json<ActorEventsResponse>, ApiError> {
    let events = db::get_events_for_actor(&state.pool, &actor).await?;
    Ok(Json(ActorEventsResponse {
        count: events.len(),
        actor,
        events,
    }))
}
