use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::store::models::{RosterEntryInput, TeamInput};
use crate::store::repositories::TeamRepository;

pub async fn create_team(
    team_repo: web::Data<TeamRepository>,
    input: web::Json<TeamInput>,
) -> Result<HttpResponse> {
    let team = team_repo.create_team(input.into_inner()).await?;
    Ok(ApiResponse::created(team))
}

pub async fn get_team(
    team_repo: web::Data<TeamRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let team = team_repo
        .get_team_by_id(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("team {}", id)))?;
    Ok(ApiResponse::success(team))
}

pub async fn add_roster_entry(
    team_repo: web::Data<TeamRepository>,
    path: web::Path<Uuid>,
    input: web::Json<RosterEntryInput>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    let mut input = input.into_inner();
    input.team_id = team_id;

    let entry = team_repo.add_roster_entry(input).await?;
    Ok(ApiResponse::created(entry))
}

pub async fn get_roster(
    team_repo: web::Data<TeamRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    if team_repo.get_team_by_id(team_id).await.is_none() {
        return Err(AppError::NotFound(format!("team {}", team_id)).into());
    }

    let roster = team_repo.get_roster(team_id).await;
    Ok(ApiResponse::success(roster))
}
