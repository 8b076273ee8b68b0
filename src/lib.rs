use std::sync::Arc;

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::AppError;
pub use services::{LifecycleService, Notifier};

use ports::GeocodingPort;

pub struct AppState {
    pub lifecycle_service: LifecycleService,
    pub notifier: Notifier,
    pub geocoding: Arc<dyn GeocodingPort>,
}
