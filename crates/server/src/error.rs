use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use docsum_common::DocsumError;
use std::fmt;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// HTTP boundary wrapper rendering every failure as `{"error": message}`
#[derive(Debug)]
pub struct ApiError(pub DocsumError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<DocsumError> for ApiError {
    fn from(err: DocsumError) -> Self {
        Self(err)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if self.0.is_client_error() {
            warn!("Request rejected ({}): {}", status, self.0);
        } else {
            error!("Request failed ({}): {}", status, self.0);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.0.to_string(),
        })
    }
}
