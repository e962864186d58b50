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
pub struct GradeRequest {
    pub submission_id: i64,
    pub grade: f64,
    #[validate(length(max = 5000, message = "feedback must be at most 5000 characters"))]
    pub feedback: Option<String>,
}

/// PUT /api/assignments/grade
///
/// Records a grade on a submission. The course owner or an admin may grade; the
/// student, their lecturers and admins receive a `gradeUpdate` notification.
///
/// ### Request Body
/// ```json
/// { "submission_id": 12, "grade": 95, "feedback": "Well structured" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated submission
/// - `400 Bad Request` if the grade is outside the assignment's scale
/// - `403 Forbidden` if the caller does not own the course
/// - `404 Not Found` if the submission does not exist
pub async fn grade_submission(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<GradeRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return ApiResponse::<Empty>::error(format_validation_errors(&e))
            .with_status(StatusCode::BAD_REQUEST);
    }

    match assignment_service(&app_state)
        .grade_assignment(req.submission_id, req.grade, user.user_id(), req.feedback.as_deref())
        .await
    {
        Ok(submission) => {
            ApiResponse::success(submission, "Grade recorded").with_status(StatusCode::OK)
        }
        Err(e) => service_error_response(e),
    }
}
