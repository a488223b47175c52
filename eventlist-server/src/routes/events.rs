//! Event collection endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use eventlist_core::{Event, EventId, EventPatch, NewEvent};
use serde_json::{Value, json};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router(resource: &str) -> Router<AppState> {
    let collection = format!("/{}", resource.trim_matches('/'));
    let member = format!("{collection}/{{id}}");

    Router::new()
        .route(&collection, get(list_events).post(create_event))
        .route(&member, get(get_event).put(update_event).delete(delete_event))
}

/// GET /events - List all events in insertion order
async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.list().await)
}

/// GET /events/:id - Fetch one event
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Event>, AppError> {
    let id: EventId = id.parse()?;
    Ok(Json(state.get(id).await?))
}

/// POST /events - Create an event; the server assigns its id
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = state.create(req).await?;
    tracing::info!(id = %event.id, name = %event.event_name, "created event");
    Ok((StatusCode::CREATED, Json(event)))
}

/// PUT /events/:id - Merge the given fields into an event
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<Json<Event>, AppError> {
    let id: EventId = id.parse()?;
    let event = state.update(id, patch).await?;
    tracing::info!(id = %event.id, "updated event");
    Ok(Json(event))
}

/// DELETE /events/:id - Remove an event
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id: EventId = id.parse()?;
    state.delete(id).await?;
    tracing::info!(id = %id, "deleted event");
    Ok(Json(json!({})))
}
