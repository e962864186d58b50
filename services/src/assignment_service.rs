//! Grading, submission and grade reporting.

use std::sync::Arc;

use db::grade::{self, CourseGrade};
use db::models::{assignment, assignment_submission, course, enrollment, user};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::error::ServiceError;
use crate::notification_service::Notifier;
use crate::policy::{self, AccessDecision, DenyReason};

/// A student's standing in one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub student_id: i64,
    pub course_id: i64,
    pub course_title: String,
    #[serde(flatten)]
    pub grade: CourseGrade,
}

#[derive(Clone)]
pub struct AssignmentService {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl AssignmentService {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Records a grade on a submission and notifies the student and staff.
    ///
    /// The grade is committed before any notification is attempted, and a failed
    /// notification never fails the call.
    pub async fn grade_assignment(
        &self,
        submission_id: i64,
        grade: f64,
        acting_user_id: i64,
        feedback: Option<&str>,
    ) -> Result<assignment_submission::Model, ServiceError> {
        let (submission, assignment) =
            assignment_submission::Model::find_with_assignment(&self.db, submission_id)
                .await?
                .ok_or(ServiceError::NotFound("Submission"))?;
        let assignment = assignment.ok_or(ServiceError::NotFound("Assignment"))?;
        let course = course::Model::find_by_id(&self.db, assignment.course_id)
            .await?
            .ok_or(ServiceError::NotFound("Course"))?;

        let decision = match user::Model::find_by_id(&self.db, acting_user_id).await? {
            Some(actor) => policy::authorize_grading(actor.role, actor.id, course.lecturer_id),
            None => AccessDecision::Deny(DenyReason::InsufficientRole),
        };
        if let AccessDecision::Deny(reason) = decision {
            tracing::warn!(acting_user_id, submission_id, %reason, "Grading denied");
        }
        decision.into_result()?;

        validate_grade(grade, assignment.grade_ceiling())?;

        let updated =
            assignment_submission::Model::record_grade(&self.db, submission.id, grade, feedback)
                .await?;
        tracing::info!(
            submission_id,
            student_id = updated.student_id,
            acting_user_id,
            grade,
            "Submission graded"
        );

        if let Err(e) = self
            .notifier
            .grade_updated(
                updated.student_id,
                assignment.id,
                &assignment.title,
                &course.title,
                grade,
            )
            .await
        {
            tracing::warn!(error = %e, submission_id, "Failed to send grade notification");
        }

        Ok(updated)
    }

    /// Creates or replaces a student's submission.
    ///
    /// Only enrolled students may submit. Once graded, a submission is frozen.
    pub async fn submit_assignment(
        &self,
        student_id: i64,
        assignment_id: i64,
        submission_text: Option<&str>,
        file_url: Option<&str>,
    ) -> Result<assignment_submission::Model, ServiceError> {
        let submission_text = submission_text.map(str::trim).filter(|s| !s.is_empty());
        let file_url = file_url.map(str::trim).filter(|s| !s.is_empty());
        if submission_text.is_none() && file_url.is_none() {
            return Err(ServiceError::InvalidArgument(
                "submission must include text or a file".into(),
            ));
        }

        let student = user::Model::find_by_id(&self.db, student_id)
            .await?
            .ok_or(ServiceError::NotFound("Student"))?;
        let assignment = assignment::Model::find_by_id(&self.db, assignment_id)
            .await?
            .ok_or(ServiceError::NotFound("Assignment"))?;

        let enrolled =
            enrollment::Model::is_enrolled(&self.db, student.id, assignment.course_id).await?;
        policy::authorize_submission(student.role, enrolled).into_result()?;

        let saved = match assignment_submission::Model::find_for(&self.db, assignment.id, student.id)
            .await?
        {
            Some(existing) if existing.is_graded() => {
                return Err(ServiceError::Conflict(
                    "submission has already been graded".into(),
                ));
            }
            Some(existing) => {
                assignment_submission::Model::resubmit(
                    &self.db,
                    existing.id,
                    submission_text,
                    file_url,
                )
                .await?
            }
            None => assignment_submission::Model::create(
                &self.db,
                assignment.id,
                student.id,
                submission_text,
                file_url,
            )
            .await
            .map_err(|e| ServiceError::from_insert(e, "submission already exists"))?,
        };

        tracing::info!(student_id, assignment_id, submission_id = saved.id, "Assignment submitted");
        Ok(saved)
    }

    pub async fn calculate_student_grade(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<GradeReport, ServiceError> {
        user::Model::find_by_id(&self.db, student_id)
            .await?
            .ok_or(ServiceError::NotFound("Student"))?;
        let course = course::Model::find_by_id(&self.db, course_id)
            .await?
            .ok_or(ServiceError::NotFound("Course"))?;

        let grade = grade::load_course_grade(&self.db, student_id, course_id).await?;

        Ok(GradeReport {
            student_id,
            course_id,
            course_title: course.title,
            grade,
        })
    }
}

fn validate_grade(grade: f64, ceiling: f64) -> Result<(), ServiceError> {
    if !grade.is_finite() || grade < 0.0 || grade > ceiling {
        return Err(ServiceError::InvalidArgument(format!(
            "grade must be between 0 and {ceiling}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_bounds_are_inclusive() {
        assert!(validate_grade(0.0, 100.0).is_ok());
        assert!(validate_grade(100.0, 100.0).is_ok());
        assert!(validate_grade(100.5, 100.0).is_err());
        assert!(validate_grade(-0.1, 100.0).is_err());
        assert!(validate_grade(f64::NAN, 100.0).is_err());
        assert!(validate_grade(f64::INFINITY, 100.0).is_err());
        assert!(validate_grade(18.0, 20.0).is_ok());
        assert!(validate_grade(21.0, 20.0).is_err());
    }
}
