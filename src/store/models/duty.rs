use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyKind {
    Snacks,
    Drinks,
}

impl std::fmt::Display for DutyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DutyKind::Snacks => write!(f, "snacks"),
            DutyKind::Drinks => write!(f, "drinks"),
        }
    }
}

/// Volunteer duty attached to an event. Independent of carpool logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duty {
    pub id: Uuid,
    pub event_id: Uuid,
    pub kind: DutyKind,
    /// Roster entry of the volunteering family, once claimed.
    pub assignee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyInput {
    pub kind: DutyKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyClaimInput {
    pub assignee_id: Uuid,
}
