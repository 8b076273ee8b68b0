use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::Store;
use crate::store::models::{
    Carpool, Event, Passenger, PassengerStatus, RosterEntry, RoutePlan, TripState,
};

/// Repository over carpool trips.
///
/// Each trip sits behind its own mutex, so a check-then-mutate sequence
/// (capacity, duplicates, lifecycle guards) is atomic per trip. The route
/// computation path deliberately does not hold that lock across the network
/// call; it re-validates with the trip's version counter when applying the
/// plan instead.
#[derive(Clone)]
pub struct CarpoolRepository {
    store: Arc<Store>,
}

impl CarpoolRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Register a driver's ride offer for an event. Always starts with zero
    /// passengers in `Unplanned`.
    pub async fn create_carpool(
        &self,
        event: &Event,
        driver: &RosterEntry,
    ) -> Result<Carpool, AppError> {
        if !driver.is_driver() {
            return Err(AppError::Validation(format!(
                "{} is not registered as a driver",
                driver.parent_name
            )));
        }

        let mut carpools = self.store.carpools.write().await;

        // One offer per driver per event.
        for existing in carpools.values() {
            let guard = existing.lock().await;
            if guard.event_id == event.id && guard.driver_id == driver.id {
                return Err(AppError::Conflict(format!(
                    "{} already offered a ride for this event",
                    driver.parent_name
                )));
            }
        }

        let carpool = Carpool {
            id: Uuid::new_v4(),
            event_id: event.id,
            driver_id: driver.id,
            driver_name: driver.parent_name.clone(),
            capacity: driver.passenger_capacity(),
            passengers: Vec::new(),
            state: TripState::Unplanned,
            plan: None,
            started_at: None,
            completed_at: None,
            version: 0,
            created_at: Utc::now(),
        };

        carpools.insert(carpool.id, Arc::new(Mutex::new(carpool.clone())));
        Ok(carpool)
    }

    async fn handle(&self, id: Uuid) -> Result<Arc<Mutex<Carpool>>, AppError> {
        self.store
            .carpools
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("carpool {}", id)))
    }

    pub async fn get_carpool_by_id(&self, id: Uuid) -> Option<Carpool> {
        let handle = self.store.carpools.read().await.get(&id).cloned()?;
        let guard = handle.lock().await;
        Some(guard.clone())
    }

    pub async fn get_carpools_for_event(&self, event_id: Uuid) -> Vec<Carpool> {
        let handles: Vec<Arc<Mutex<Carpool>>> =
            self.store.carpools.read().await.values().cloned().collect();

        let mut carpools = Vec::new();
        for handle in handles {
            let guard = handle.lock().await;
            if guard.event_id == event_id {
                carpools.push(guard.clone());
            }
        }
        carpools.sort_by_key(|c| (c.created_at, c.id));
        carpools
    }

    /// Atomic check-then-append of a ride request.
    ///
    /// Returns the updated trip and whether a previously computed plan was
    /// invalidated by the mutation.
    pub async fn add_passenger(
        &self,
        carpool_id: Uuid,
        rider: &RosterEntry,
    ) -> Result<(Carpool, bool), AppError> {
        let handle = self.handle(carpool_id).await?;
        let mut carpool = handle.lock().await;

        if carpool.driver_id == rider.id {
            return Err(AppError::Conflict(format!(
                "{} is driving this carpool",
                rider.player_name
            )));
        }
        if matches!(
            carpool.state,
            TripState::PickupsInProgress | TripState::Completed
        ) {
            return Err(AppError::Conflict(format!(
                "carpool is {}; the passenger list is closed",
                carpool.state
            )));
        }
        if carpool.has_rider(rider.id) {
            return Err(AppError::Conflict(format!(
                "{} already has a seat in this carpool",
                rider.player_name
            )));
        }
        if carpool.seats_taken() >= carpool.capacity {
            return Err(AppError::Capacity(format!(
                "carpool is full ({} of {} seats taken)",
                carpool.seats_taken(),
                carpool.capacity
            )));
        }

        if let Some(entry) = carpool
            .passengers
            .iter_mut()
            .find(|p| p.rider_id == rider.id)
        {
            // Re-request after a cancellation.
            entry.status = PassengerStatus::Confirmed;
            entry.requested_at = Utc::now();
        } else {
            carpool.passengers.push(Passenger {
                rider_id: rider.id,
                player_name: rider.player_name.clone(),
                parent_name: rider.parent_name.clone(),
                status: PassengerStatus::Confirmed,
                requested_at: Utc::now(),
            });
        }

        let invalidated = Self::invalidate_plan(&mut carpool);
        carpool.version += 1;
        Ok((carpool.clone(), invalidated))
    }

    pub async fn remove_passenger(
        &self,
        carpool_id: Uuid,
        rider_id: Uuid,
    ) -> Result<(Carpool, bool), AppError> {
        let handle = self.handle(carpool_id).await?;
        let mut carpool = handle.lock().await;

        if matches!(
            carpool.state,
            TripState::PickupsInProgress | TripState::Completed
        ) {
            return Err(AppError::Conflict(format!(
                "carpool is {}; the passenger list is closed",
                carpool.state
            )));
        }
        if !carpool.has_rider(rider_id) {
            return Err(AppError::NotFound(format!(
                "rider {} on carpool {}",
                rider_id, carpool_id
            )));
        }

        for entry in carpool.passengers.iter_mut() {
            if entry.rider_id == rider_id {
                entry.status = PassengerStatus::Cancelled;
            }
        }

        let invalidated = Self::invalidate_plan(&mut carpool);
        carpool.version += 1;
        Ok((carpool.clone(), invalidated))
    }

    /// A passenger mutation after planning makes the stored stop order
    /// stale; drop it and fall back to `Unplanned`.
    fn invalidate_plan(carpool: &mut Carpool) -> bool {
        if carpool.state == TripState::RoutePlanned {
            carpool.plan = None;
            carpool.state = TripState::Unplanned;
            true
        } else {
            false
        }
    }

    /// Install a computed route plan, guarded by an optimistic version
    /// check: if the trip changed while the external solver was running,
    /// the plan is stale and is rejected without writing anything.
    pub async fn apply_route_plan(
        &self,
        carpool_id: Uuid,
        expected_version: u64,
        plan: RoutePlan,
    ) -> Result<Carpool, AppError> {
        let handle = self.handle(carpool_id).await?;
        let mut carpool = handle.lock().await;

        if carpool.version != expected_version {
            return Err(AppError::Conflict(
                "carpool changed while the route was being computed; retry".to_string(),
            ));
        }
        if !matches!(
            carpool.state,
            TripState::Unplanned | TripState::RoutePlanned
        ) {
            return Err(AppError::Conflict(format!(
                "cannot plan a route for a carpool that is {}",
                carpool.state
            )));
        }

        carpool.plan = Some(plan);
        carpool.state = TripState::RoutePlanned;
        carpool.version += 1;
        Ok(carpool.clone())
    }

    /// `RoutePlanned -> PickupsInProgress`, recording the trip start.
    pub async fn start_pickups(&self, carpool_id: Uuid) -> Result<Carpool, AppError> {
        let handle = self.handle(carpool_id).await?;
        let mut carpool = handle.lock().await;

        if carpool.state != TripState::RoutePlanned {
            return Err(AppError::Conflict(format!(
                "pickups can only start from a planned route (carpool is {})",
                carpool.state
            )));
        }

        carpool.state = TripState::PickupsInProgress;
        carpool.started_at = Some(Utc::now());
        carpool.version += 1;
        Ok(carpool.clone())
    }

    /// `PickupsInProgress -> Completed`. Terminal.
    pub async fn complete_trip(&self, carpool_id: Uuid) -> Result<Carpool, AppError> {
        let handle = self.handle(carpool_id).await?;
        let mut carpool = handle.lock().await;

        if carpool.state != TripState::PickupsInProgress {
            return Err(AppError::Conflict(format!(
                "only a trip with pickups in progress can complete (carpool is {})",
                carpool.state
            )));
        }

        carpool.state = TripState::Completed;
        carpool.completed_at = Some(Utc::now());
        carpool.version += 1;
        Ok(carpool.clone())
    }
}
