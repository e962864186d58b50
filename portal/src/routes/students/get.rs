use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::routes::common::{assignment_service, service_error_response};

/// GET /api/students/{student_id}/courses/{course_id}/grade
///
/// Returns the per-assignment breakdown and the weighted course grade. `final_grade`
/// is `null` until something weighted has been graded.
///
/// ### Access Control
/// Lecturers and admins, or the student themself.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "student_id": 5,
///     "course_id": 2,
///     "course_title": "Data Structures",
///     "final_grade": 78.0,
///     "total_weight": 100.0,
///     "graded_weight": 100.0,
///     "per_assignment": [
///       { "assignment_id": 1, "title": "Lab 1", "weight": 40.0, "grade": 90.0 }
///     ]
///   },
///   "message": "Grade calculated successfully"
/// }
/// ```
/// - `403 Forbidden` for another student's grade
/// - `404 Not Found` if the student or course does not exist
pub async fn get_course_grade(
    State(app_state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((student_id, course_id)): Path<(i64, i64)>,
) -> Response {
    if !user.role().is_staff() && user.user_id() != student_id {
        return ApiResponse::<Empty>::error("You may only view your own grades")
            .with_status(StatusCode::FORBIDDEN);
    }

    match assignment_service(&app_state)
        .calculate_student_grade(student_id, course_id)
        .await
    {
        Ok(report) => {
            ApiResponse::success(report, "Grade calculated successfully").with_status(StatusCode::OK)
        }
        Err(e) => service_error_response(e),
    }
}
