use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::models::RosterEntry;

/// Advisory pairing shown before any manual offers or requests exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarpoolSuggestion {
    pub driver_id: Uuid,
    pub driver_name: String,
    pub driver_player: String,
    /// Passenger seats available (driver's own player excluded).
    pub seats: u32,
    pub riders: Vec<SuggestedRider>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedRider {
    pub rider_id: Uuid,
    pub player_name: String,
    pub parent_name: String,
}

/// First-fit pass over the roster: drivers in roster order each claim the
/// next unclaimed riders up to their passenger capacity. Deterministic and
/// explainable rather than globally optimal; a rider claimed once never
/// appears in a later suggestion.
pub fn suggest_assignments(roster: &[RosterEntry]) -> Vec<CarpoolSuggestion> {
    let riders: Vec<&RosterEntry> = roster.iter().filter(|e| !e.is_driver()).collect();
    let mut next_rider = 0usize;

    roster
        .iter()
        .filter(|entry| entry.is_driver())
        .map(|driver| {
            let take = (driver.passenger_capacity() as usize)
                .min(riders.len().saturating_sub(next_rider));
            let claimed: Vec<SuggestedRider> = riders[next_rider..next_rider + take]
                .iter()
                .map(|rider| SuggestedRider {
                    rider_id: rider.id,
                    player_name: rider.player_name.clone(),
                    parent_name: rider.parent_name.clone(),
                })
                .collect();
            next_rider += take;

            CarpoolSuggestion {
                driver_id: driver.id,
                driver_name: driver.parent_name.clone(),
                driver_player: driver.player_name.clone(),
                seats: driver.passenger_capacity(),
                riders: claimed,
            }
        })
        .collect()
}
