//! Course listing and enrollment.

use std::sync::Arc;

use db::models::course::CourseDetails;
use db::models::{course, enrollment, user};
use sea_orm::DatabaseConnection;
use util::ws::EnrollmentAction;

use crate::error::ServiceError;
use crate::notification_service::Notifier;
use crate::policy;

#[derive(Clone)]
pub struct CourseService {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl CourseService {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Every course with its lecturer, assignments and enrollments.
    pub async fn list_courses(&self) -> Result<Vec<CourseDetails>, ServiceError> {
        let courses = course::Model::get_all(&self.db).await?;
        Ok(course::Model::with_details(&self.db, courses).await?)
    }

    pub async fn find_course(&self, course_id: i64) -> Result<CourseDetails, ServiceError> {
        let course = self.course(course_id).await?;
        course::Model::with_details(&self.db, vec![course])
            .await?
            .pop()
            .ok_or(ServiceError::NotFound("Course"))
    }

    async fn course(&self, course_id: i64) -> Result<course::Model, ServiceError> {
        course::Model::find_by_id(&self.db, course_id)
            .await?
            .ok_or(ServiceError::NotFound("Course"))
    }

    /// Enrolls a student. The existence check is a fast path; the unique index on
    /// (student, course) settles concurrent attempts, and a losing insert is also
    /// reported as `Conflict`.
    pub async fn enroll_student(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<enrollment::Model, ServiceError> {
        let student = user::Model::find_by_id(&self.db, student_id)
            .await?
            .ok_or(ServiceError::NotFound("Student"))?;
        let course = self.course(course_id).await?;

        policy::authorize_enrollment(student.role).into_result()?;

        if enrollment::Model::is_enrolled(&self.db, student.id, course.id).await? {
            return Err(ServiceError::Conflict(
                "Student already enrolled in this course".into(),
            ));
        }

        let created = enrollment::Model::create(&self.db, student.id, course.id)
            .await
            .map_err(|e| ServiceError::from_insert(e, "Student already enrolled in this course"))?;
        tracing::info!(student_id, course_id, "Student enrolled");

        self.notify(student.id, &course, EnrollmentAction::Enrolled).await;
        Ok(created)
    }

    pub async fn unenroll_student(&self, student_id: i64, course_id: i64) -> Result<(), ServiceError> {
        let course = self.course(course_id).await?;
        let existing = enrollment::Model::find(&self.db, student_id, course.id)
            .await?
            .ok_or(ServiceError::NotFound("Enrollment"))?;

        enrollment::Model::delete(&self.db, existing.id).await?;
        tracing::info!(student_id, course_id, "Student unenrolled");

        self.notify(student_id, &course, EnrollmentAction::Unenrolled).await;
        Ok(())
    }

    async fn notify(&self, student_id: i64, course: &course::Model, action: EnrollmentAction) {
        if let Err(e) = self
            .notifier
            .enrollment_changed(student_id, course.id, &course.title, action)
            .await
        {
            tracing::warn!(error = %e, student_id, course_id = course.id, "Failed to send enrollment notification");
        }
    }
}
