use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::store::models::RideRequestInput;
use crate::store::repositories::{CarpoolRepository, EventRepository, TeamRepository};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRideInput {
    pub driver_id: Uuid,
}

/// A driver offers a ride for an event. Always starts empty and unplanned.
pub async fn offer_ride(
    event_repo: web::Data<EventRepository>,
    team_repo: web::Data<TeamRepository>,
    carpool_repo: web::Data<CarpoolRepository>,
    path: web::Path<Uuid>,
    input: web::Json<OfferRideInput>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    let event = event_repo
        .get_event_by_id(event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;

    let driver = team_repo
        .get_roster_entry(input.driver_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("roster entry {}", input.driver_id)))?;
    if driver.team_id != event.team_id {
        return Err(AppError::Validation(
            "driver is not on this event's team".to_string(),
        )
        .into());
    }

    let carpool = carpool_repo.create_carpool(&event, &driver).await?;
    log::info!(
        "carpool {} offered by {} for event {}",
        carpool.id,
        carpool.driver_name,
        event_id
    );
    Ok(ApiResponse::created(carpool))
}

pub async fn get_carpools_for_event(
    event_repo: web::Data<EventRepository>,
    carpool_repo: web::Data<CarpoolRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    if event_repo.get_event_by_id(event_id).await.is_none() {
        return Err(AppError::NotFound(format!("event {}", event_id)).into());
    }

    let carpools = carpool_repo.get_carpools_for_event(event_id).await;
    Ok(ApiResponse::success(carpools))
}

pub async fn get_carpool(
    carpool_repo: web::Data<CarpoolRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let carpool = carpool_repo
        .get_carpool_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("carpool {}", id)))?;
    Ok(ApiResponse::success(carpool))
}

/// Request a seat. The capacity and duplicate checks run atomically under
/// the carpool's lock; a full carpool or a repeated request comes back as a
/// typed error, never a silent no-op.
pub async fn request_ride(
    state: web::Data<AppState>,
    event_repo: web::Data<EventRepository>,
    team_repo: web::Data<TeamRepository>,
    carpool_repo: web::Data<CarpoolRepository>,
    path: web::Path<Uuid>,
    input: web::Json<RideRequestInput>,
) -> Result<HttpResponse> {
    let carpool_id = path.into_inner();
    let carpool = carpool_repo
        .get_carpool_by_id(carpool_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("carpool {}", carpool_id)))?;
    let event = event_repo
        .get_event_by_id(carpool.event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("event {}", carpool.event_id)))?;

    let rider = team_repo
        .get_roster_entry(input.rider_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("roster entry {}", input.rider_id)))?;
    if rider.team_id != event.team_id {
        return Err(AppError::Validation(
            "rider is not on this event's team".to_string(),
        )
        .into());
    }

    let (updated, plan_invalidated) = carpool_repo.add_passenger(carpool_id, &rider).await?;
    state
        .notifier
        .ride_confirmed(event.team_id, &updated, rider.id)
        .await;

    if plan_invalidated {
        log::info!(
            "carpool {} route plan invalidated by new passenger {}",
            carpool_id,
            rider.player_name
        );
        return Ok(ApiResponse::success_with_message(
            updated,
            "passenger added; the planned route is stale and was cleared",
        ));
    }
    Ok(ApiResponse::created(updated))
}

pub async fn cancel_ride(
    state: web::Data<AppState>,
    event_repo: web::Data<EventRepository>,
    carpool_repo: web::Data<CarpoolRepository>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse> {
    let (carpool_id, rider_id) = path.into_inner();

    let (updated, plan_invalidated) = carpool_repo.remove_passenger(carpool_id, rider_id).await?;
    let event = event_repo
        .get_event_by_id(updated.event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("event {}", updated.event_id)))?;
    state
        .notifier
        .ride_cancelled(event.team_id, &updated, rider_id)
        .await;

    if plan_invalidated {
        return Ok(ApiResponse::success_with_message(
            updated,
            "passenger removed; the planned route is stale and was cleared",
        ));
    }
    Ok(ApiResponse::success(updated))
}

pub async fn compute_route(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let carpool = state
        .lifecycle_service
        .compute_route(path.into_inner())
        .await?;
    Ok(ApiResponse::success(carpool))
}

pub async fn get_schedule(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let schedule = state
        .lifecycle_service
        .pickup_schedule(path.into_inner())
        .await?;
    Ok(ApiResponse::success(schedule))
}

pub async fn start_pickups(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let carpool = state
        .lifecycle_service
        .start_pickups(path.into_inner())
        .await?;
    Ok(ApiResponse::success(carpool))
}

pub async fn complete_trip(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let carpool = state
        .lifecycle_service
        .complete_trip(path.into_inner())
        .await?;
    Ok(ApiResponse::success(carpool))
}
