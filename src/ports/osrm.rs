use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::routing::{RouteRequest, RouteResponse, RoutingError, RoutingPort};

/// Thin HTTP adapter over the OSRM `trip` service, which orders the stops
/// of a single vehicle for us (open trip: start fixed at the driver's
/// origin, end fixed at the venue).
#[derive(Debug, Clone)]
pub struct OsrmRoutingClient {
    client: Client,
    endpoint: String,
}

impl OsrmRoutingClient {
    /// `endpoint` is the OSRM base URL, e.g. `http://localhost:5000`.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RoutingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn trip_url(&self, request: &RouteRequest) -> Result<Url, RoutingError> {
        let mut coords = Vec::with_capacity(request.pickups.len() + 2);
        coords.push(format!("{},{}", request.origin.lng, request.origin.lat));
        for pickup in &request.pickups {
            coords.push(format!(
                "{},{}",
                pickup.coordinates.lng, pickup.coordinates.lat
            ));
        }
        coords.push(format!(
            "{},{}",
            request.destination.lng, request.destination.lat
        ));

        let base = format!(
            "{}/trip/v1/driving/{}",
            self.endpoint,
            coords.join(";")
        );
        let mut url = Url::parse(&base)
            .map_err(|err| RoutingError::Rejected(format!("failed to build OSRM URL: {}", err)))?;
        url.query_pairs_mut()
            .append_pair("roundtrip", "false")
            .append_pair("source", "first")
            .append_pair("destination", "last")
            .append_pair("steps", "false");
        Ok(url)
    }
}

#[async_trait]
impl RoutingPort for OsrmRoutingClient {
    async fn optimize(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        if request.pickups.is_empty() {
            return Err(RoutingError::EmptyRequest);
        }

        let url = self.trip_url(request)?;
        log::debug!(
            "requesting OSRM trip for {} pickups (vehicle capacity {})",
            request.pickups.len(),
            request.vehicle_capacity
        );

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(RoutingError::Rejected(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let parsed: OsrmTripResponse = response.json().await?;
        translate_trip_response(request, parsed)
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OsrmTripResponse {
    pub(super) code: String,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) waypoints: Vec<OsrmTripWaypoint>,
    #[serde(default)]
    pub(super) trips: Vec<OsrmTrip>,
}

/// One entry per *input* coordinate, carrying the position OSRM assigned it
/// in the optimized visiting order.
#[derive(Debug, Deserialize)]
pub(super) struct OsrmTripWaypoint {
    pub(super) waypoint_index: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct OsrmTrip {
    pub(super) duration: f64,
    pub(super) distance: f64,
    #[serde(default)]
    pub(super) legs: Vec<OsrmTripLeg>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OsrmTripLeg {
    pub(super) duration: f64,
}

/// Translate OSRM's index-based ordering back onto rider ids.
///
/// Input order was `[origin, pickups.., destination]`; waypoint `i` in the
/// response corresponds to input coordinate `i`, and its `waypoint_index`
/// is the slot it was given in the optimized trip. Origin and destination
/// were pinned with `source=first`/`destination=last`, so they must come
/// back in slots `0` and `n+1`.
pub(super) fn translate_trip_response(
    request: &RouteRequest,
    response: OsrmTripResponse,
) -> Result<RouteResponse, RoutingError> {
    if response.code != "Ok" {
        return Err(RoutingError::Rejected(
            response.message.unwrap_or(response.code),
        ));
    }

    let stops = request.pickups.len();
    if response.waypoints.len() != stops + 2 {
        return Err(RoutingError::Malformed(format!(
            "expected {} waypoints, got {}",
            stops + 2,
            response.waypoints.len()
        )));
    }
    let trip = response
        .trips
        .first()
        .ok_or_else(|| RoutingError::Malformed("no trip in response".to_string()))?;
    if trip.legs.len() != stops + 1 {
        return Err(RoutingError::Malformed(format!(
            "expected {} legs, got {}",
            stops + 1,
            trip.legs.len()
        )));
    }
    if response.waypoints[0].waypoint_index != 0
        || response.waypoints[stops + 1].waypoint_index != stops + 1
    {
        return Err(RoutingError::Malformed(
            "origin or destination not pinned to the trip ends".to_string(),
        ));
    }

    // Pickup input position -> visiting slot; invert to slot -> rider id.
    let mut order: Vec<(usize, uuid::Uuid)> = Vec::with_capacity(stops);
    for (input_pos, pickup) in request.pickups.iter().enumerate() {
        let slot = response.waypoints[input_pos + 1].waypoint_index;
        if slot == 0 || slot > stops {
            return Err(RoutingError::Malformed(format!(
                "pickup assigned to out-of-range slot {}",
                slot
            )));
        }
        order.push((slot, pickup.id));
    }
    order.sort_by_key(|(slot, _)| *slot);
    if order.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(RoutingError::Malformed(
            "duplicate visiting slot in response".to_string(),
        ));
    }

    Ok(RouteResponse {
        stop_order: order.into_iter().map(|(_, id)| id).collect(),
        leg_duration_secs: trip
            .legs
            .iter()
            .map(|leg| leg.duration.round() as u32)
            .collect(),
        total_duration_secs: trip.duration.round() as u32,
        total_distance_m: trip.distance,
    })
}
