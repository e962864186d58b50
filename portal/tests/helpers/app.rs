use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use db::models::{assignment, course, user};
use db::test_utils::setup_test_db;
use serde_json::Value;
use tower::ServiceExt;
use util::{
    auth::JwtVerifier,
    config::AppConfig,
    roles::Role,
    state::AppState,
    ws::NotificationGateway,
};

pub const TEST_SECRET: &str = "portal-test-secret";

/// A fresh app over an in-memory database seeded with one course.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub lecturer: user::Model,
    pub other_lecturer: user::Model,
    pub admin: user::Model,
    pub student: user::Model,
    pub course: course::Model,
    pub assignment: assignment::Model,
}

impl TestApp {
    /// Signs a token with the configured secret, as a login would.
    pub fn token(&self, user: &user::Model) -> String {
        portal::auth::generate_jwt(user.id, user.role)
            .expect("Failed to sign test token")
            .0
    }
}

pub async fn make_test_app() -> TestApp {
    AppConfig::set_jwt_secret(TEST_SECRET);

    let db = setup_test_db().await;
    let lecturer = user::Model::create(&db, "lecturer@uni.test", "Lecturer", Role::Lecturer)
        .await
        .unwrap();
    let other_lecturer = user::Model::create(&db, "other@uni.test", "Other", Role::Lecturer)
        .await
        .unwrap();
    let admin = user::Model::create(&db, "admin@uni.test", "Admin", Role::Admin)
        .await
        .unwrap();
    let student = user::Model::create(&db, "student@uni.test", "Student", Role::Student)
        .await
        .unwrap();
    let course = course::Model::create(&db, "Operating Systems", 16, Some("Processes"), lecturer.id)
        .await
        .unwrap();
    let assignment =
        assignment::Model::create(&db, course.id, "Scheduler", None, Utc::now(), 50.0, None)
            .await
            .unwrap();

    let gateway = NotificationGateway::new(Arc::new(JwtVerifier::new(TEST_SECRET)));
    let state = AppState::new(db, gateway);

    TestApp {
        router: portal::app(state.clone()),
        state,
        lecturer,
        other_lecturer,
        admin,
        student,
        course,
        assignment,
    }
}

/// Sends one request through the router and decodes the JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
