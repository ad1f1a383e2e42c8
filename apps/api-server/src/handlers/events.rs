//! Event handlers - a small append-only event log.

use actix_web::{HttpResponse, web};

use quill_core::domain::{Event, NewEvent};
use quill_shared::dto::{CreateEventRequest, EventResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const RECENT_EVENTS_LIMIT: i64 = 100;

fn event_response(event: &Event) -> EventResponse {
    EventResponse {
        id: event.id.to_hex(),
        name: event.name.clone(),
        payload: serde_json::to_value(&event.payload).unwrap_or(serde_json::Value::Null),
        created_at: event.created_at.to_rfc3339(),
    }
}

/// POST /events
pub async fn record_event(
    state: web::Data<AppState>,
    body: web::Json<CreateEventRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let payload = req
        .payload
        .map(|value| bson::to_document(&value))
        .transpose()
        .map_err(|_| AppError::BadRequest("`payload` must be a JSON object".to_string()))?;

    let event = state
        .events
        .record_event(NewEvent {
            name: req.name.unwrap_or_default(),
            payload,
        })
        .await?;

    Ok(HttpResponse::Created().json(event_response(&event)))
}

/// GET /events
pub async fn list_events(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let events = state.events.list_events(RECENT_EVENTS_LIMIT).await?;
    let body: Vec<EventResponse> = events.iter().map(event_response).collect();
    Ok(HttpResponse::Ok().json(body))
}
