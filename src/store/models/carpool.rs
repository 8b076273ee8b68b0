use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a single trip. Planning fields are only meaningful from
/// `RoutePlanned` onwards; any passenger mutation after planning drops the
/// plan and returns the trip to `Unplanned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TripState {
    Unplanned,
    RoutePlanned,
    PickupsInProgress,
    Completed,
}

impl std::fmt::Display for TripState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripState::Unplanned => write!(f, "unplanned"),
            TripState::RoutePlanned => write!(f, "route planned"),
            TripState::PickupsInProgress => write!(f, "pickups in progress"),
            TripState::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PassengerStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    /// Roster entry of the riding player/parent pair.
    pub rider_id: Uuid,
    pub player_name: String,
    pub parent_name: String,
    pub status: PassengerStatus,
    pub requested_at: DateTime<Utc>,
}

/// Outcome of a successful route optimization, kept on the carpool so ETAs
/// can be re-derived at any time from the stored leg durations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    /// Rider roster ids in visiting order. The event venue is implicitly
    /// last.
    pub stop_order: Vec<Uuid>,
    /// One entry per leg: origin -> first stop, ..., last stop -> venue.
    pub leg_duration_secs: Vec<u32>,
    pub total_duration_secs: u32,
    pub total_distance_m: f64,
    pub suggested_departure: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carpool {
    pub id: Uuid,
    pub event_id: Uuid,
    /// Roster entry of the driving family.
    pub driver_id: Uuid,
    pub driver_name: String,
    /// Passenger seats (driver's own player already excluded).
    pub capacity: u32,
    pub passengers: Vec<Passenger>,
    pub state: TripState,
    pub plan: Option<RoutePlan>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Bumped on every mutation; used for optimistic checks around the
    /// external routing call.
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl Carpool {
    pub fn confirmed_passengers(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers
            .iter()
            .filter(|p| p.status == PassengerStatus::Confirmed)
    }

    pub fn seats_taken(&self) -> u32 {
        self.confirmed_passengers().count() as u32
    }

    pub fn has_rider(&self, rider_id: Uuid) -> bool {
        self.confirmed_passengers().any(|p| p.rider_id == rider_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideRequestInput {
    pub rider_id: Uuid,
}
