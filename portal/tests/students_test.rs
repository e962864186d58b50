mod helpers;

use axum::http::{Method, StatusCode};
use db::models::assignment_submission;
use helpers::{make_test_app, send};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn grade_report_for_self_and_staff_only() {
    let app = make_test_app().await;
    let sub = assignment_submission::Model::create(
        app.state.db(),
        app.assignment.id,
        app.student.id,
        Some("work"),
        None,
    )
    .await
    .unwrap();
    assignment_submission::Model::record_grade(app.state.db(), sub.id, 70.0, None)
        .await
        .unwrap();

    let uri = format!(
        "/api/students/{}/courses/{}/grade",
        app.student.id, app.course.id
    );

    let (status, body) = send(&app.router, Method::GET, &uri, Some(&app.token(&app.student)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["final_grade"], 70.0);
    assert_eq!(body["data"]["total_weight"], 50.0);
    assert_eq!(body["data"]["per_assignment"][0]["grade"], 70.0);

    let (status, _) = send(&app.router, Method::GET, &uri, Some(&app.token(&app.admin)), None).await;
    assert_eq!(status, StatusCode::OK);

    let other_uri = format!("/api/students/{}/courses/{}/grade", app.admin.id, app.course.id);
    let (status, _) = send(&app.router, Method::GET, &other_uri, Some(&app.token(&app.student)), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let missing = format!("/api/students/{}/courses/999/grade", app.student.id);
    let (status, _) = send(&app.router, Method::GET, &missing, Some(&app.token(&app.lecturer)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn ungraded_course_has_null_final_grade() {
    let app = make_test_app().await;
    let uri = format!(
        "/api/students/{}/courses/{}/grade",
        app.student.id, app.course.id
    );

    let (status, body) = send(&app.router, Method::GET, &uri, Some(&app.token(&app.lecturer)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["final_grade"].is_null());
}
