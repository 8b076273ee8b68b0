use serde::{Deserialize, Serialize};

/// WGS84 point, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A resolved (or still unresolved) venue.
///
/// Geocoding may fail or be skipped; a location without coordinates is a
/// valid record, but route computation refuses it with a precondition error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub name: String,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub place_id: Option<String>,
}

impl Location {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            coordinates: None,
            place_id: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }
}
