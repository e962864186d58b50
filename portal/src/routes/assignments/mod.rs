//! # Assignments Routes Module
//!
//! - `PUT  /assignments/grade`  → record a grade (lecturer/admin)
//! - `POST /assignments/submit` → hand in work (enrolled students)

use axum::{
    Router,
    middleware::from_fn,
    routing::{post, put},
};
use util::state::AppState;

use crate::auth::guards::{allow_authenticated, allow_staff};

pub mod post;
pub mod put;

pub fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route("/grade", put(put::grade_submission).route_layer(from_fn(allow_staff)))
        .route(
            "/submit",
            post(post::submit_assignment).route_layer(from_fn(allow_authenticated)),
        )
}
