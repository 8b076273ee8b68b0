use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::store::models::Coordinates;

/// One pickup stop handed to the solver, keyed by the rider's roster id so
/// the returned ordering can be translated back without ambiguity.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub id: Uuid,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub pickups: Vec<Pickup>,
    pub destination: Coordinates,
    /// Occupants the vehicle must hold: passengers plus the driver.
    pub vehicle_capacity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// Pickup ids in visiting order; the destination is implicitly last.
    pub stop_order: Vec<Uuid>,
    /// One duration per leg, ending with the leg into the destination.
    pub leg_duration_secs: Vec<u32>,
    pub total_duration_secs: u32,
    pub total_distance_m: f64,
}

/// Failures from the external routing service. All recoverable; the caller
/// decides whether to retry.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("route request has no pickups")]
    EmptyRequest,

    #[error("routing service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing service rejected the request: {0}")]
    Rejected(String),

    #[error("routing service returned a malformed response: {0}")]
    Malformed(String),
}

/// Abstraction over an external vehicle-routing capability: given a driver
/// origin, pickup stops and a destination, produce an ordered visiting
/// sequence with timing.
#[async_trait]
pub trait RoutingPort: Send + Sync {
    async fn optimize(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError>;
}
