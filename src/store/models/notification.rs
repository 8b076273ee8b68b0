use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationKind {
    RideConfirmed,
    RideCancelled,
    RoutePlanned,
    PickupsStarted,
    TripCompleted,
}

/// Structured record handed to the notification sink. The core only ever
/// produces these; delivery and read-state UI live elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub team_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// When set, the notification is addressed to a single family.
    pub target_rider_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationInput {
    pub team_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub target_rider_id: Option<Uuid>,
}
