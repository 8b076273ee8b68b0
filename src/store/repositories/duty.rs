use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::Store;
use crate::store::models::{Duty, DutyKind};

#[derive(Clone)]
pub struct DutyRepository {
    store: Arc<Store>,
}

impl DutyRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn create_duty(&self, event_id: Uuid, kind: DutyKind) -> Result<Duty, AppError> {
        let mut duties = self.store.duties.write().await;

        for existing in duties.values() {
            if existing.event_id == event_id && existing.kind == kind {
                return Err(AppError::Conflict(format!(
                    "a {} duty already exists for this event",
                    kind
                )));
            }
        }

        let duty = Duty {
            id: Uuid::new_v4(),
            event_id,
            kind,
            assignee_id: None,
            created_at: Utc::now(),
        };
        duties.insert(duty.id, duty.clone());
        Ok(duty)
    }

    pub async fn claim_duty(&self, duty_id: Uuid, assignee_id: Uuid) -> Result<Duty, AppError> {
        let mut duties = self.store.duties.write().await;
        let duty = duties
            .get_mut(&duty_id)
            .ok_or_else(|| AppError::NotFound(format!("duty {}", duty_id)))?;

        if duty.assignee_id.is_some() {
            return Err(AppError::Conflict(format!(
                "the {} duty is already taken",
                duty.kind
            )));
        }

        duty.assignee_id = Some(assignee_id);
        Ok(duty.clone())
    }

    pub async fn get_duties_for_event(&self, event_id: Uuid) -> Vec<Duty> {
        let mut duties: Vec<Duty> = self
            .store
            .duties
            .read()
            .await
            .values()
            .filter(|duty| duty.event_id == event_id)
            .cloned()
            .collect();
        duties.sort_by_key(|duty| (duty.created_at, duty.id));
        duties
    }
}
