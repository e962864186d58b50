//! Shared helpers for route handlers.

use std::sync::Arc;

use axum::{http::StatusCode, response::Response};
use services::{AssignmentService, CourseService, NotificationService, ServiceError};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;

pub fn assignment_service(state: &AppState) -> AssignmentService {
    AssignmentService::new(
        state.db_clone(),
        Arc::new(NotificationService::new(state.gateway_clone())),
    )
}

pub fn course_service(state: &AppState) -> CourseService {
    CourseService::new(
        state.db_clone(),
        Arc::new(NotificationService::new(state.gateway_clone())),
    )
}

pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a service failure to its HTTP response. Database details are logged, not returned.
pub fn service_error_response(err: ServiceError) -> Response {
    let status = status_for(&err);
    let message = match &err {
        ServiceError::Database(e) => {
            tracing::error!(error = %e, "Database error");
            "Database error occurred".to_string()
        }
        other => other.to_string(),
    };
    ApiResponse::<Empty>::error(message).with_status(status)
}

/// Formats `validator` failures as a single message.
pub fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
