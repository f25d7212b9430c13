//! HTTP error mapping.
//!
//! `NotFound` keeps the 500 status the client already handles, and adds a
//! machine-readable `code` so callers can tell it apart from other failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campass_core::ServiceError;
use log::{error, warn};
use serde::Serialize;

pub const CODE_NOT_FOUND: &str = "not_found";
pub const CODE_INTERNAL: &str = "internal";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: CODE_INTERNAL,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound { kind, id } => {
                warn!("event=http_error module=server status=error error_code={CODE_NOT_FOUND} kind={kind} id={id}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: CODE_NOT_FOUND,
                    message: value.to_string(),
                }
            }
            other => {
                error!("event=http_error module=server status=error error_code={CODE_INTERNAL} error={other}");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
