use crate::metrics;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use employee_core::{EmployeeError, ErrorDetail};
use serde::Serialize;
use tracing::{error, warn};

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug)]
pub enum ApiError {
    Employee(EmployeeError),
    /// The body names a different employee than the route.
    IdMismatch,
    /// Unreadable body, query string or route id.
    Malformed(String),
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        ApiError::Employee(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed(rejection.body_text())
    }
}

pub fn status_for(err: &EmployeeError) -> StatusCode {
    match err {
        EmployeeError::Validation(_) | EmployeeError::Domain(_) => StatusCode::BAD_REQUEST,
        EmployeeError::NotFound { .. } => StatusCode::NOT_FOUND,
        EmployeeError::Conflict(_) => StatusCode::CONFLICT,
        EmployeeError::Database { .. } | EmployeeError::Json(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            ApiError::Employee(err) => {
                let status = status_for(&err);
                if status.is_server_error() {
                    error!("Request failed: {}", err);
                } else {
                    warn!("Request rejected: {}", err);
                }
                (status, err.details())
            }
            ApiError::IdMismatch => (
                StatusCode::BAD_REQUEST,
                vec![ErrorDetail::new(
                    "Request.IdMismatch",
                    "The id in the body does not match the id in the route",
                )],
            ),
            ApiError::Malformed(reason) => {
                warn!("Malformed request: {}", reason);
                (
                    StatusCode::BAD_REQUEST,
                    vec![ErrorDetail::new("Request.Malformed", reason)],
                )
            }
        };

        if let Some(first) = errors.first() {
            metrics::rejected(&first.code);
        }
        (status, Json(ErrorResponse { errors })).into_response()
    }
}
