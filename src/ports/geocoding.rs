use async_trait::async_trait;
use thiserror::Error;

use crate::store::models::Location;

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("geocoding service rejected the request: {0}")]
    Rejected(String),

    #[error("no match for \"{0}\"")]
    NoMatch(String),
}

/// Resolves free-text venues into named, addressed coordinates. Resolution
/// failures are tolerated at event creation (the event keeps an unresolved
/// location); routing later refuses unresolved venues.
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Location, GeocodeError>;
}
