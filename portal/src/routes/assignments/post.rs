use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::{assignment_service, format_validation_errors, service_error_response};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    pub assignment_id: i64,
    pub submission_text: Option<String>,
    #[validate(url(message = "file_url must be a valid URL"))]
    pub file_url: Option<String>,
}

/// POST /api/assignments/submit
///
/// Creates the caller's submission, or replaces it while still ungraded.
///
/// ### Responses
/// - `201 Created` with the stored submission
/// - `400 Bad Request` if neither text nor a file is provided
/// - `403 Forbidden` if the caller is not an enrolled student
/// - `409 Conflict` if the submission was already graded
pub async fn submit_assignment(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return ApiResponse::<Empty>::error(format_validation_errors(&e))
            .with_status(StatusCode::BAD_REQUEST);
    }

    match assignment_service(&app_state)
        .submit_assignment(
            user.user_id(),
            req.assignment_id,
            req.submission_text.as_deref(),
            req.file_url.as_deref(),
        )
        .await
    {
        Ok(submission) => ApiResponse::success(submission, "Assignment submitted")
            .with_status(StatusCode::CREATED),
        Err(e) => service_error_response(e),
    }
}
