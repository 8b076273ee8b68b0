use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::AppState;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::{assignment, pickup_plan, schedule};
use crate::store::models::{DutyClaimInput, DutyInput, EventInput, Location, RecurrenceTag};
use crate::store::repositories::{DutyRepository, EventRepository, NewEvent, TeamRepository};

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamQuery {
    pub team_id: Uuid,
}

/// Create an event, expanding a weekly recurrence into one record per
/// occurrence. The venue text is resolved through the geocoding port;
/// resolution failure is tolerated here and surfaces later as a routing
/// precondition.
pub async fn create_event(
    state: web::Data<AppState>,
    event_repo: web::Data<EventRepository>,
    team_repo: web::Data<TeamRepository>,
    input: web::Json<EventInput>,
) -> Result<HttpResponse> {
    let input = input.into_inner();

    if team_repo.get_team_by_id(input.team_id).await.is_none() {
        return Err(AppError::NotFound(format!("team {}", input.team_id)).into());
    }

    let start_time = pickup_plan::parse_clock(&input.time)?;
    let arrive_by = match &input.arrive_by {
        Some(raw) => pickup_plan::parse_clock(raw)?,
        None => start_time,
    };

    let (dates, recurrence) = match &input.recurrence {
        Some(rec) => (
            schedule::expand_dates(input.date, Some(rec.weekday), Some(rec.end_date))?,
            Some(RecurrenceTag {
                weekday: rec.weekday,
                series_id: Uuid::new_v4(),
            }),
        ),
        None => (schedule::expand_dates(input.date, None, None)?, None),
    };

    let location = match state.geocoding.resolve(&input.location).await {
        Ok(resolved) => resolved,
        Err(err) => {
            log::warn!(
                "could not resolve \"{}\": {}; creating event with unresolved location",
                input.location,
                err
            );
            Location::unresolved(&input.location)
        }
    };

    let events = event_repo
        .create_events(
            NewEvent {
                team_id: input.team_id,
                kind: input.kind,
                title: input.title,
                start_time,
                arrive_by,
                location,
                needs_volunteers: input.needs_volunteers,
                recurrence,
            },
            dates,
        )
        .await?;

    Ok(ApiResponse::created(events))
}

pub async fn get_events(
    event_repo: web::Data<EventRepository>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse> {
    let events = event_repo.get_events_for_team(query.team_id).await;
    Ok(ApiResponse::success(events))
}

pub async fn get_event(
    event_repo: web::Data<EventRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let event = event_repo
        .get_event_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("event {}", id)))?;
    Ok(ApiResponse::success(event))
}

/// Advisory driver/rider pairing for an event, computed fresh from the
/// roster on every call.
pub async fn get_suggestions(
    event_repo: web::Data<EventRepository>,
    team_repo: web::Data<TeamRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let event = event_repo
        .get_event_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("event {}", id)))?;

    let roster = team_repo.get_roster(event.team_id).await;
    let suggestions = assignment::suggest_assignments(&roster);
    Ok(ApiResponse::success(suggestions))
}

pub async fn create_duty(
    event_repo: web::Data<EventRepository>,
    duty_repo: web::Data<DutyRepository>,
    path: web::Path<Uuid>,
    input: web::Json<DutyInput>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    let event = event_repo
        .get_event_by_id(event_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("event {}", event_id)))?;

    if !event.needs_volunteers {
        return Err(AppError::Conflict(
            "this event does not take volunteer duties".to_string(),
        )
        .into());
    }

    let duty = duty_repo.create_duty(event_id, input.kind).await?;
    Ok(ApiResponse::created(duty))
}

pub async fn get_duties(
    event_repo: web::Data<EventRepository>,
    duty_repo: web::Data<DutyRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let event_id = path.into_inner();
    if event_repo.get_event_by_id(event_id).await.is_none() {
        return Err(AppError::NotFound(format!("event {}", event_id)).into());
    }

    let duties = duty_repo.get_duties_for_event(event_id).await;
    Ok(ApiResponse::success(duties))
}

pub async fn claim_duty(
    duty_repo: web::Data<DutyRepository>,
    team_repo: web::Data<TeamRepository>,
    path: web::Path<Uuid>,
    input: web::Json<DutyClaimInput>,
) -> Result<HttpResponse> {
    if team_repo
        .get_roster_entry(input.assignee_id)
        .await
        .is_none()
    {
        return Err(AppError::NotFound(format!("roster entry {}", input.assignee_id)).into());
    }

    let duty = duty_repo
        .claim_duty(path.into_inner(), input.assignee_id)
        .await?;
    Ok(ApiResponse::success(duty))
}
