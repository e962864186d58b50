use axum::{Router, middleware::from_fn, routing::get};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;

pub mod get;

pub fn student_routes() -> Router<AppState> {
    Router::new().route(
        "/{student_id}/courses/{course_id}/grade",
        get(get::get_course_grade).route_layer(from_fn(allow_authenticated)),
    )
}
