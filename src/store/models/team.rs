use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::location::Coordinates;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub coach_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInput {
    pub name: String,
    pub coach_name: String,
}

/// One player/parent pair on a team roster.
///
/// `seats` counts every seat in the family vehicle, including the one the
/// driver's own player takes. Passenger capacity for a carpool is therefore
/// `seats - 1` (see [`RosterEntry::passenger_capacity`]); that convention is
/// applied uniformly across suggestions, ride requests and route planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: Uuid,
    pub team_id: Uuid,
    pub player_name: String,
    pub jersey_number: Option<u16>,
    pub parent_name: String,
    pub phone: Option<String>,
    pub can_drive: bool,
    pub seats: u32,
    pub home_coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
}

impl RosterEntry {
    /// Seats left for riders once the driver's own player is on board.
    pub fn passenger_capacity(&self) -> u32 {
        self.seats.saturating_sub(1)
    }

    pub fn is_driver(&self) -> bool {
        self.can_drive && self.seats > 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryInput {
    pub team_id: Uuid,
    pub player_name: String,
    pub jersey_number: Option<u16>,
    pub parent_name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub can_drive: bool,
    #[serde(default)]
    pub seats: u32,
    pub home_coordinates: Option<Coordinates>,
}
