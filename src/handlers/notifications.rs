use actix_web::{HttpResponse, Result, web};
use uuid::Uuid;

use crate::handlers::shared::ApiResponse;
use crate::store::repositories::NotificationRepository;

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    /// Restrict the feed to records visible to one family.
    pub rider_id: Option<Uuid>,
}

pub async fn get_notifications(
    notification_repo: web::Data<NotificationRepository>,
    path: web::Path<Uuid>,
    query: web::Query<NotificationQuery>,
) -> Result<HttpResponse> {
    let notifications = notification_repo
        .get_notifications_for_team(path.into_inner(), query.rider_id)
        .await;
    Ok(ApiResponse::success(notifications))
}

pub async fn mark_read(
    notification_repo: web::Data<NotificationRepository>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let notification = notification_repo.mark_read(path.into_inner()).await?;
    Ok(ApiResponse::success(notification))
}
