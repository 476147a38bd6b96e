pub mod interaction;
pub mod metrics;

pub use interaction::interaction_handler;
pub use metrics::metrics_handler;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use interaction_check_domain::AddressError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidAddress(#[from] AddressError),
    #[error("a check for this address is already running")]
    CheckInProgress,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidAddress(_) => StatusCode::BAD_REQUEST,
            ApiError::CheckInProgress => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
