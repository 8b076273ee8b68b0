use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::ports::routing::{Pickup, RouteRequest, RoutingPort};
use crate::services::pickup_plan;
use crate::store::models::{Carpool, Event, RoutePlan, TripState};
use crate::store::repositories::{CarpoolRepository, EventRepository, TeamRepository};

use super::notifier::Notifier;

/// Per-stop timing re-derived from a stored route plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupSchedule {
    pub carpool_id: Uuid,
    pub departure: NaiveDateTime,
    pub stops: Vec<PickupStop>,
    pub destination_eta: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupStop {
    pub position: usize,
    pub rider_id: Uuid,
    pub player_name: String,
    pub eta: NaiveDateTime,
}

/// Drives a trip through its states and fans out notifications on each
/// transition. Holds no state of its own; every mutation goes through the
/// carpool repository's per-trip lock or version check.
#[derive(Clone)]
pub struct LifecycleService {
    carpools: CarpoolRepository,
    events: EventRepository,
    teams: TeamRepository,
    notifier: Notifier,
    routing: Arc<dyn RoutingPort>,
}

impl LifecycleService {
    pub fn new(
        carpools: CarpoolRepository,
        events: EventRepository,
        teams: TeamRepository,
        notifier: Notifier,
        routing: Arc<dyn RoutingPort>,
    ) -> Self {
        Self {
            carpools,
            events,
            teams,
            notifier,
            routing,
        }
    }

    async fn carpool(&self, carpool_id: Uuid) -> Result<Carpool, AppError> {
        self.carpools
            .get_carpool_by_id(carpool_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("carpool {}", carpool_id)))
    }

    async fn event_for(&self, carpool: &Carpool) -> Result<Event, AppError> {
        self.events
            .get_event_by_id(carpool.event_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("event {}", carpool.event_id)))
    }

    /// `Unplanned -> RoutePlanned` via the routing port.
    ///
    /// The snapshot's version is captured before the external call and
    /// checked when the plan is applied, so a trip mutated mid-flight keeps
    /// its prior state and the caller sees a conflict. A port failure or
    /// timeout changes nothing.
    pub async fn compute_route(&self, carpool_id: Uuid) -> Result<Carpool, AppError> {
        let snapshot = self.carpool(carpool_id).await?;
        if matches!(
            snapshot.state,
            TripState::PickupsInProgress | TripState::Completed
        ) {
            return Err(AppError::Conflict(format!(
                "cannot replan a carpool that is {}",
                snapshot.state
            )));
        }

        let event = self.event_for(&snapshot).await?;
        let destination = event.location.coordinates.ok_or_else(|| {
            AppError::Precondition(format!(
                "event location \"{}\" has no resolved coordinates",
                event.location.name
            ))
        })?;

        let driver = self
            .teams
            .get_roster_entry(snapshot.driver_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("driver {}", snapshot.driver_id)))?;
        let origin = driver.home_coordinates.ok_or_else(|| {
            AppError::Precondition(format!(
                "driver {} has no home coordinates on file",
                driver.parent_name
            ))
        })?;

        let riders: Vec<Uuid> = snapshot
            .confirmed_passengers()
            .map(|p| p.rider_id)
            .collect();
        if riders.is_empty() {
            return Err(AppError::Validation(
                "carpool has no passengers to route".to_string(),
            ));
        }

        let mut pickups = Vec::with_capacity(riders.len());
        for rider_id in riders {
            let rider = self
                .teams
                .get_roster_entry(rider_id)
                .await
                .ok_or_else(|| AppError::NotFound(format!("rider {}", rider_id)))?;
            let coordinates = rider.home_coordinates.ok_or_else(|| {
                AppError::Precondition(format!(
                    "{}'s family has no home coordinates on file",
                    rider.player_name
                ))
            })?;
            pickups.push(Pickup {
                id: rider.id,
                coordinates,
            });
        }

        let request = RouteRequest {
            origin,
            vehicle_capacity: pickups.len() as u32 + 1,
            pickups,
            destination,
        };

        let route = self.routing.optimize(&request).await?;
        let departure = pickup_plan::suggested_departure(event.arrive_by, route.total_duration_secs)?;

        let plan = RoutePlan {
            stop_order: route.stop_order,
            leg_duration_secs: route.leg_duration_secs,
            total_duration_secs: route.total_duration_secs,
            total_distance_m: route.total_distance_m,
            suggested_departure: departure,
        };

        let updated = self
            .carpools
            .apply_route_plan(carpool_id, snapshot.version, plan.clone())
            .await?;

        log::info!(
            "carpool {} route planned: {} stops, {}s, departs {}",
            carpool_id,
            plan.stop_order.len(),
            plan.total_duration_secs,
            departure
        );
        self.notifier
            .route_planned(event.team_id, &updated, &plan)
            .await;

        Ok(updated)
    }

    /// `RoutePlanned -> PickupsInProgress`; notifies every passenger with
    /// their position in the stop order.
    pub async fn start_pickups(&self, carpool_id: Uuid) -> Result<Carpool, AppError> {
        let updated = self.carpools.start_pickups(carpool_id).await?;
        let event = self.event_for(&updated).await?;

        if let Some(plan) = &updated.plan {
            self.notifier
                .pickups_started(event.team_id, &updated, plan)
                .await;
        }

        log::info!("carpool {} started pickups", carpool_id);
        Ok(updated)
    }

    /// `PickupsInProgress -> Completed`. Terminal.
    pub async fn complete_trip(&self, carpool_id: Uuid) -> Result<Carpool, AppError> {
        let updated = self.carpools.complete_trip(carpool_id).await?;
        let event = self.event_for(&updated).await?;

        self.notifier.trip_completed(event.team_id, &updated).await;

        log::info!("carpool {} completed", carpool_id);
        Ok(updated)
    }

    /// Rebuild per-stop ETAs from the stored plan. Available any time after
    /// planning; purely derived, never cached.
    pub async fn pickup_schedule(&self, carpool_id: Uuid) -> Result<PickupSchedule, AppError> {
        let carpool = self.carpool(carpool_id).await?;
        let plan = carpool.plan.as_ref().ok_or_else(|| {
            AppError::Conflict(format!(
                "carpool is {}; no route has been planned",
                carpool.state
            ))
        })?;
        let event = self.event_for(&carpool).await?;

        let departure = event.date.and_time(plan.suggested_departure);
        let etas = pickup_plan::stop_etas(departure, &plan.leg_duration_secs);

        // One leg per pickup plus the final leg into the venue.
        let destination_eta = *etas.last().ok_or_else(|| {
            AppError::Conflict("stored plan has no legs".to_string())
        })?;

        let stops = plan
            .stop_order
            .iter()
            .zip(&etas)
            .enumerate()
            .map(|(index, (rider_id, eta))| PickupStop {
                position: index + 1,
                rider_id: *rider_id,
                player_name: rider_name(&carpool, *rider_id),
                eta: *eta,
            })
            .collect();

        Ok(PickupSchedule {
            carpool_id,
            departure,
            stops,
            destination_eta,
        })
    }
}

fn rider_name(carpool: &Carpool, rider_id: Uuid) -> String {
    carpool
        .passengers
        .iter()
        .find(|p| p.rider_id == rider_id)
        .map(|p| p.player_name.clone())
        .unwrap_or_default()
}
