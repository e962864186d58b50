use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use util::state::AppState;

use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::{course_service, service_error_response};

/// DELETE /api/courses/{course_id}/students/{student_id}
pub async fn unenroll_student(
    State(app_state): State<AppState>,
    Path((course_id, student_id)): Path<(i64, i64)>,
) -> Response {
    match course_service(&app_state)
        .unenroll_student(student_id, course_id)
        .await
    {
        Ok(()) => ApiResponse::success(Empty, "Student unenrolled successfully")
            .with_status(StatusCode::OK),
        Err(e) => service_error_response(e),
    }
}
