use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::AppError;
use crate::store::Store;
use crate::store::models::{RosterEntry, RosterEntryInput, Team, TeamInput};

#[derive(Clone)]
pub struct TeamRepository {
    store: Arc<Store>,
}

impl TeamRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn create_team(&self, input: TeamInput) -> Result<Team, AppError> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation("team name is required".to_string()));
        }

        let team = Team {
            id: Uuid::new_v4(),
            name: input.name,
            coach_name: input.coach_name,
            created_at: Utc::now(),
        };

        self.store.teams.write().await.insert(team.id, team.clone());
        Ok(team)
    }

    pub async fn get_team_by_id(&self, id: Uuid) -> Option<Team> {
        self.store.teams.read().await.get(&id).cloned()
    }

    pub async fn add_roster_entry(
        &self,
        input: RosterEntryInput,
    ) -> Result<RosterEntry, AppError> {
        if self.get_team_by_id(input.team_id).await.is_none() {
            return Err(AppError::NotFound(format!("team {}", input.team_id)));
        }
        if input.can_drive && input.seats == 0 {
            return Err(AppError::Validation(
                "a driving family needs at least one seat".to_string(),
            ));
        }

        let entry = RosterEntry {
            id: Uuid::new_v4(),
            team_id: input.team_id,
            player_name: input.player_name,
            jersey_number: input.jersey_number,
            parent_name: input.parent_name,
            phone: input.phone,
            can_drive: input.can_drive,
            seats: input.seats,
            home_coordinates: input.home_coordinates,
            created_at: Utc::now(),
        };

        self.store
            .roster
            .write()
            .await
            .insert(entry.id, entry.clone());
        Ok(entry)
    }

    pub async fn get_roster_entry(&self, id: Uuid) -> Option<RosterEntry> {
        self.store.roster.read().await.get(&id).cloned()
    }

    /// Roster in stable order (by creation time, then id for ties). The
    /// suggestion heuristic depends on this ordering being deterministic.
    pub async fn get_roster(&self, team_id: Uuid) -> Vec<RosterEntry> {
        let mut roster: Vec<RosterEntry> = self
            .store
            .roster
            .read()
            .await
            .values()
            .filter(|entry| entry.team_id == team_id)
            .cloned()
            .collect();
        roster.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        roster
    }
}
