//! # Courses Routes Module
//!
//! - `GET    /courses`                                 → list courses
//! - `GET    /courses/{course_id}`                     → one course
//! - `POST   /courses/enroll`                          → enroll a student (lecturer/admin)
//! - `DELETE /courses/{course_id}/students/{student_id}` → unenroll (lecturer/admin)

use axum::{
    Router,
    middleware::from_fn,
    routing::{delete, get, post},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_staff};

pub mod delete;
pub mod get;
pub mod post;

pub fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::get_courses).route_layer(from_fn(allow_authenticated)))
        .route(
            "/{course_id}",
            get(get::get_course).route_layer(from_fn(allow_authenticated)),
        )
        .route("/enroll", post(post::enroll_student).route_layer(from_fn(allow_staff)))
        .route(
            "/{course_id}/students/{student_id}",
            delete(delete::unenroll_student).route_layer(from_fn(allow_staff)),
        )
}
