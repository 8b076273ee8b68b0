use uuid::Uuid;

use crate::store::models::{Carpool, NotificationInput, NotificationKind, RoutePlan};
use crate::store::repositories::NotificationRepository;

/// Composes and records the structured notifications the lifecycle emits.
/// Delivery (push, badges, screens) belongs to the sink, not here.
#[derive(Clone)]
pub struct Notifier {
    repository: NotificationRepository,
}

impl Notifier {
    pub fn new(repository: NotificationRepository) -> Self {
        Self { repository }
    }

    pub async fn ride_confirmed(&self, team_id: Uuid, carpool: &Carpool, rider_id: Uuid) {
        self.repository
            .create_notification(NotificationInput {
                team_id,
                kind: NotificationKind::RideConfirmed,
                title: "Ride confirmed".to_string(),
                message: format!("{} will drive to the event", carpool.driver_name),
                target_rider_id: Some(rider_id),
            })
            .await;
    }

    pub async fn ride_cancelled(&self, team_id: Uuid, carpool: &Carpool, rider_id: Uuid) {
        self.repository
            .create_notification(NotificationInput {
                team_id,
                kind: NotificationKind::RideCancelled,
                title: "Ride cancelled".to_string(),
                message: format!("Seat released in {}'s carpool", carpool.driver_name),
                target_rider_id: Some(rider_id),
            })
            .await;
    }

    /// Tell every confirmed passenger when the driver plans to leave.
    pub async fn route_planned(&self, team_id: Uuid, carpool: &Carpool, plan: &RoutePlan) {
        for passenger in carpool.confirmed_passengers() {
            self.repository
                .create_notification(NotificationInput {
                    team_id,
                    kind: NotificationKind::RoutePlanned,
                    title: "Pickup route planned".to_string(),
                    message: format!(
                        "{} plans to leave at {}",
                        carpool.driver_name,
                        plan.suggested_departure.format("%-I:%M %p")
                    ),
                    target_rider_id: Some(passenger.rider_id),
                })
                .await;
        }
    }

    /// One notification per passenger carrying their 1-based position in
    /// the stop order, so each family can anticipate their wait.
    pub async fn pickups_started(&self, team_id: Uuid, carpool: &Carpool, plan: &RoutePlan) {
        for (index, rider_id) in plan.stop_order.iter().enumerate() {
            self.repository
                .create_notification(NotificationInput {
                    team_id,
                    kind: NotificationKind::PickupsStarted,
                    title: "Driver is on the way".to_string(),
                    message: format!(
                        "{} has started pickups; you are stop {} of {}",
                        carpool.driver_name,
                        index + 1,
                        plan.stop_order.len()
                    ),
                    target_rider_id: Some(*rider_id),
                })
                .await;
        }
    }

    pub async fn trip_completed(&self, team_id: Uuid, carpool: &Carpool) {
        for passenger in carpool.confirmed_passengers() {
            self.repository
                .create_notification(NotificationInput {
                    team_id,
                    kind: NotificationKind::TripCompleted,
                    title: "Trip completed".to_string(),
                    message: format!("{}'s carpool has arrived", carpool.driver_name),
                    target_rider_id: Some(passenger.rider_id),
                })
                .await;
        }
    }
}
