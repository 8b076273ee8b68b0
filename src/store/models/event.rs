use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Game,
    Practice,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Game => write!(f, "game"),
            EventKind::Practice => write!(f, "practice"),
        }
    }
}

/// A dated team event. Immutable once created; recurring input expands into
/// one event per occurrence, all sharing a `series_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub team_id: Uuid,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    /// Deadline the team must be at the venue by. Defaults to `start_time`.
    pub arrive_by: NaiveTime,
    pub location: Location,
    pub needs_volunteers: bool,
    pub recurrence: Option<RecurrenceTag>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceTag {
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
    pub series_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub team_id: Uuid,
    pub kind: EventKind,
    pub title: String,
    pub date: NaiveDate,
    /// 12-hour clock, e.g. "10:00 AM".
    pub time: String,
    /// 12-hour clock; defaults to `time` when absent.
    pub arrive_by: Option<String>,
    /// Free-text venue, resolved through the geocoding port.
    pub location: String,
    #[serde(default)]
    pub needs_volunteers: bool,
    pub recurrence: Option<RecurrenceInput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceInput {
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: u8,
    pub end_date: NaiveDate,
}
