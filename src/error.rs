use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::handlers::shared::ApiResponse;
use crate::ports::routing::RoutingError;

/// Error taxonomy for the coordination core.
///
/// Every variant is recoverable and user-facing; an operation either
/// succeeds and advances visible state or fails with one of these and
/// leaves state untouched. Retrying external-service failures is the
/// caller's responsibility.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("No seats left: {0}")]
    Capacity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Precondition(_) => StatusCode::PRECONDITION_FAILED,
            AppError::Capacity(_) => StatusCode::CONFLICT,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        log::error!(
            "Request failed with status {}: {}",
            status_code,
            error_message
        );

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(&error_message))
    }
}

impl From<RoutingError> for AppError {
    fn from(error: RoutingError) -> Self {
        match error {
            RoutingError::EmptyRequest => {
                AppError::Validation("nothing to route: no pickups supplied".to_string())
            }
            other => AppError::ExternalService(other.to_string()),
        }
    }
}
