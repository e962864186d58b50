#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use db::models::{assignment, assignment_submission, course, user};
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;
use services::Notifier;
use util::roles::Role;
use util::ws::{EnrollmentAction, GatewayError};

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Grade {
        student_id: i64,
        assignment_id: i64,
        assignment_title: String,
        course_name: String,
        grade: f64,
    },
    Enrollment {
        student_id: i64,
        course_id: i64,
        action: EnrollmentAction,
    },
}

/// Records every notification instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn grade_updated(
        &self,
        student_id: i64,
        assignment_id: i64,
        assignment_title: &str,
        course_name: &str,
        grade: f64,
    ) -> Result<(), GatewayError> {
        self.sent.lock().unwrap().push(Sent::Grade {
            student_id,
            assignment_id,
            assignment_title: assignment_title.into(),
            course_name: course_name.into(),
            grade,
        });
        Ok(())
    }

    async fn enrollment_changed(
        &self,
        student_id: i64,
        course_id: i64,
        _course_name: &str,
        action: EnrollmentAction,
    ) -> Result<(), GatewayError> {
        self.sent.lock().unwrap().push(Sent::Enrollment {
            student_id,
            course_id,
            action,
        });
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn grade_updated(
        &self,
        _: i64,
        _: i64,
        _: &str,
        _: &str,
        _: f64,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::SessionClosed(uuid::Uuid::nil()))
    }

    async fn enrollment_changed(
        &self,
        _: i64,
        _: i64,
        _: &str,
        _: EnrollmentAction,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::SessionClosed(uuid::Uuid::nil()))
    }
}

/// One course owned by `owner`, a second lecturer, an admin and two students.
pub struct World {
    pub db: DatabaseConnection,
    pub owner: user::Model,
    pub other_lecturer: user::Model,
    pub admin: user::Model,
    pub student: user::Model,
    pub other_student: user::Model,
    pub course: course::Model,
    pub assignment: assignment::Model,
}

impl World {
    pub async fn new() -> Self {
        let db = setup_test_db().await;
        let owner = user::Model::create(&db, "owner@uni.test", "Lecturer One", Role::Lecturer)
            .await
            .unwrap();
        let other_lecturer =
            user::Model::create(&db, "other@uni.test", "Lecturer Two", Role::Lecturer)
                .await
                .unwrap();
        let admin = user::Model::create(&db, "admin@uni.test", "Admin", Role::Admin)
            .await
            .unwrap();
        let student = user::Model::create(&db, "s1@uni.test", "Student One", Role::Student)
            .await
            .unwrap();
        let other_student = user::Model::create(&db, "s2@uni.test", "Student Two", Role::Student)
            .await
            .unwrap();
        let course = course::Model::create(&db, "Data Structures", 16, None, owner.id)
            .await
            .unwrap();
        let assignment = assignment::Model::create(
            &db,
            course.id,
            "Lab 2",
            None,
            Utc::now(),
            40.0,
            None,
        )
        .await
        .unwrap();

        Self {
            db,
            owner,
            other_lecturer,
            admin,
            student,
            other_student,
            course,
            assignment,
        }
    }

    pub async fn submission(&self) -> assignment_submission::Model {
        assignment_submission::Model::create(
            &self.db,
            self.assignment.id,
            self.student.id,
            Some("my answer"),
            None,
        )
        .await
        .unwrap()
    }

    pub fn recorder() -> Arc<RecordingNotifier> {
        Arc::new(RecordingNotifier::default())
    }
}
