//! HTTP route entry point for `/api/...`.
//!
//! - `/health`        → health check (public)
//! - `/assignments`   → grading and submission
//! - `/courses`       → course listing and enrollment
//! - `/students`      → grade reports
//! - `/notifications` → live-connection stats

use axum::Router;
use util::state::AppState;

use crate::routes::{
    assignments::assignment_routes, courses::course_routes, health::health_routes,
    notifications::notification_routes, students::student_routes,
};

pub mod assignments;
pub mod common;
pub mod courses;
pub mod health;
pub mod notifications;
pub mod students;

/// Builds the complete `/api` router. Each group applies its own guards.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/assignments", assignment_routes())
        .nest("/courses", course_routes())
        .nest("/students", student_routes())
        .nest("/notifications", notification_routes())
        .with_state(app_state)
}
