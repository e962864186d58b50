use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::{course_service, service_error_response};

/// GET /api/courses
pub async fn get_courses(State(app_state): State<AppState>) -> Response {
    match course_service(&app_state).list_courses().await {
        Ok(courses) => {
            ApiResponse::success(courses, "Courses retrieved successfully").with_status(StatusCode::OK)
        }
        Err(e) => service_error_response(e),
    }
}

/// GET /api/courses/{course_id}
///
/// ### Responses
/// - `200 OK` with the course
/// - `404 Not Found` if it does not exist
pub async fn get_course(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    match course_service(&app_state).find_course(course_id).await {
        Ok(course) => {
            ApiResponse::success(course, "Course retrieved successfully").with_status(StatusCode::OK)
        }
        Err(e) => service_error_response(e),
    }
}
