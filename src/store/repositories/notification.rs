use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::Store;
use crate::store::models::{Notification, NotificationInput};

#[derive(Clone)]
pub struct NotificationRepository {
    store: Arc<Store>,
}

impl NotificationRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn create_notification(&self, input: NotificationInput) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            team_id: input.team_id,
            kind: input.kind,
            title: input.title,
            message: input.message,
            target_rider_id: input.target_rider_id,
            read: false,
            created_at: Utc::now(),
        };

        self.store
            .notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        notification
    }

    /// Team feed, newest first. With `rider_id` set, team-wide records and
    /// records addressed to that family.
    pub async fn get_notifications_for_team(
        &self,
        team_id: Uuid,
        rider_id: Option<Uuid>,
    ) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .store
            .notifications
            .read()
            .await
            .values()
            .filter(|n| n.team_id == team_id)
            .filter(|n| match (rider_id, n.target_rider_id) {
                (Some(rider), Some(target)) => rider == target,
                (Some(_), None) => true,
                (None, _) => true,
            })
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        notifications
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<Notification, AppError> {
        let mut notifications = self.store.notifications.write().await;
        let notification = notifications
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("notification {}", id)))?;
        notification.read = true;
        Ok(notification.clone())
    }
}
