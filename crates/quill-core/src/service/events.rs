//! The events service: a small append-only log of application events.

use std::sync::Arc;

use crate::domain::{Event, NewEvent};
use crate::error::DomainError;
use crate::ports::EventRepository;

pub struct EventsService {
    events: Arc<dyn EventRepository>,
}

impl EventsService {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Record an event. Fails with a validation error naming `name` when
    /// the name is missing or empty.
    pub async fn record_event(&self, fields: NewEvent) -> Result<Event, DomainError> {
        let event = Event::new(fields)?;
        tracing::debug!(event_id = %event.id, name = %event.name, "recording event");
        Ok(self.events.insert(event).await?)
    }

    /// The most recently recorded events, newest first.
    pub async fn list_events(&self, limit: i64) -> Result<Vec<Event>, DomainError> {
        Ok(self.events.list_recent(limit).await?)
    }
}
