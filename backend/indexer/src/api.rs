//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::Result;
use crate::events::EventRecord;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ProjectEventsResponse {
    pub project_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AccountEventsResponse {
    pub address: String,
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

/// Render a query result as `200` JSON, or `500` with the error message.
fn respond<T: Serialize>(result: Result<T>) -> Response {
    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            error!("API query failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
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

/// `GET /projects/:id/events`
///
/// Returns all indexed events for the given project identifier.
pub async fn get_project_events(
    State(state): State<Arc<ApiState>>,
    Path(project_id): Path<String>,
) -> Response {
    let result = db::get_events_for_project(&state.pool, &project_id)
        .await
        .map(|events| ProjectEventsResponse {
            project_id,
            count: events.len(),
            events,
        });
    respond(result)
}

/// `GET /accounts/:address/events`
///
/// Returns the projects an address created, funded, claimed or was refunded from.
pub async fn get_account_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> Response {
    let result = db::get_events_for_actor(&state.pool, &address)
        .await
        .map(|events| AccountEventsResponse {
            address,
            count: events.len(),
            events,
        });
    respond(result)
}

/// `GET /events`
///
/// Returns all indexed events across all projects.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> Response {
    let result = db::get_all_events(&state.pool)
        .await
        .map(|events| AllEventsResponse {
            count: events.len(),
            events,
        });
    respond(result)
}
