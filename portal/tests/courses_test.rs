mod helpers;

use axum::http::{Method, StatusCode};
use helpers::{make_test_app, send};
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn any_role_can_list_and_view_courses() {
    let app = make_test_app().await;
    let token = app.token(&app.student);

    let (status, body) = send(&app.router, Method::GET, "/api/courses", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["lecturer"]["name"], "Lecturer");

    let uri = format!("/api/courses/{}", app.course.id);
    let (status, body) = send(&app.router, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Operating Systems");
    assert_eq!(body["data"]["lecturer"]["id"], app.lecturer.id);
    assert_eq!(body["data"]["assignments"][0]["title"], "Scheduler");
    assert!(body["data"]["enrollments"].as_array().unwrap().is_empty());

    let (status, _) = send(&app.router, Method::GET, "/api/courses/404", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn enroll_then_conflict_then_unenroll() {
    let app = make_test_app().await;
    let token = app.token(&app.lecturer);
    let body = json!({ "student_id": app.student.id, "course_id": app.course.id });

    let (status, created) = send(
        &app.router,
        Method::POST,
        "/api/courses/enroll",
        Some(&token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["course_id"], app.course.id);

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/courses/enroll",
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/api/courses/{}/students/{}", app.course.id, app.student.id);
    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app.router, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn enrolling_staff_is_forbidden() {
    let app = make_test_app().await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/courses/enroll",
        Some(&app.token(&app.admin)),
        Some(json!({ "student_id": app.other_lecturer.id, "course_id": app.course.id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden: user must have student role");
}

#[tokio::test]
#[serial]
async fn students_cannot_enroll_anyone() {
    let app = make_test_app().await;

    let (status, _) = send(
        &app.router,
        Method::POST,
        "/api/courses/enroll",
        Some(&app.token(&app.student)),
        Some(json!({ "student_id": app.student.id, "course_id": app.course.id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
