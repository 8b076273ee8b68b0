use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::Store;
use crate::store::models::{Event, EventKind, Location, RecurrenceTag};

/// Fields already parsed and resolved by the handler layer; one record per
/// occurrence date.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub team_id: Uuid,
    pub kind: EventKind,
    pub title: String,
    pub start_time: NaiveTime,
    pub arrive_by: NaiveTime,
    pub location: Location,
    pub needs_volunteers: bool,
    pub recurrence: Option<RecurrenceTag>,
}

#[derive(Clone)]
pub struct EventRepository {
    store: Arc<Store>,
}

impl EventRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Atomically append one event per generated occurrence date.
    pub async fn create_events(
        &self,
        new_event: NewEvent,
        dates: Vec<NaiveDate>,
    ) -> Result<Vec<Event>, AppError> {
        if dates.is_empty() {
            return Err(AppError::Validation(
                "an event needs at least one date".to_string(),
            ));
        }

        let now = Utc::now();
        let events: Vec<Event> = dates
            .into_iter()
            .map(|date| Event {
                id: Uuid::new_v4(),
                team_id: new_event.team_id,
                kind: new_event.kind,
                title: new_event.title.clone(),
                date,
                start_time: new_event.start_time,
                arrive_by: new_event.arrive_by,
                location: new_event.location.clone(),
                needs_volunteers: new_event.needs_volunteers,
                recurrence: new_event.recurrence,
                created_at: now,
            })
            .collect();

        let mut guard = self.store.events.write().await;
        for event in &events {
            guard.insert(event.id, event.clone());
        }

        Ok(events)
    }

    pub async fn get_event_by_id(&self, id: Uuid) -> Option<Event> {
        self.store.events.read().await.get(&id).cloned()
    }

    pub async fn get_events_for_team(&self, team_id: Uuid) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .store
            .events
            .read()
            .await
            .values()
            .filter(|event| event.team_id == team_id)
            .cloned()
            .collect();
        events.sort_by_key(|event| (event.date, event.start_time));
        events
    }
}
