use axum::{Json, extract::State, http::StatusCode, response::Response};
use serde::Deserialize;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{course_service, service_error_response};

#[derive(Debug, Deserialize)]
pub struct EnrollRequest {
    pub student_id: i64,
    pub course_id: i64,
}

/// POST /api/courses/enroll
///
/// Enrolls a student in a course and pushes an `enrollmentUpdate` to the student,
/// lecturers and admins.
///
/// ### Request Body
/// ```json
/// { "student_id": 5, "course_id": 2 }
/// ```
///
/// ### Responses
/// - `201 Created` with the enrollment
/// - `403 Forbidden` if the target user is not a student
/// - `404 Not Found` if the student or course does not exist
/// - `409 Conflict` if already enrolled
pub async fn enroll_student(
    State(app_state): State<AppState>,
    Json(req): Json<EnrollRequest>,
) -> Response {
    match course_service(&app_state)
        .enroll_student(req.student_id, req.course_id)
        .await
    {
        Ok(enrollment) => ApiResponse::success(enrollment, "Student enrolled successfully")
            .with_status(StatusCode::CREATED),
        Err(e) => service_error_response(e),
    }
}
