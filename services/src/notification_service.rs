//! Builds notification payloads and hands them to the gateway.

use async_trait::async_trait;
use chrono::Utc;
use util::ws::{
    EnrollmentAction, EnrollmentUpdate, GatewayError, GradeUpdate, NotificationGateway,
    events::iso_timestamp, types::ConnectionStats,
};

/// Outbound notification seam used by the grading and enrollment services.
///
/// Errors are returned to the caller, which decides whether to swallow them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn grade_updated(
        &self,
        student_id: i64,
        assignment_id: i64,
        assignment_title: &str,
        course_name: &str,
        grade: f64,
    ) -> Result<(), GatewayError>;

    async fn enrollment_changed(
        &self,
        student_id: i64,
        course_id: i64,
        course_name: &str,
        action: EnrollmentAction,
    ) -> Result<(), GatewayError>;
}

#[derive(Clone)]
pub struct NotificationService {
    gateway: NotificationGateway,
}

impl NotificationService {
    pub fn new(gateway: NotificationGateway) -> Self {
        Self { gateway }
    }

    pub async fn connection_stats(&self) -> ConnectionStats {
        self.gateway.connection_stats().await
    }
}

#[async_trait]
impl Notifier for NotificationService {
    async fn grade_updated(
        &self,
        student_id: i64,
        assignment_id: i64,
        assignment_title: &str,
        course_name: &str,
        grade: f64,
    ) -> Result<(), GatewayError> {
        self.gateway
            .emit_grade_update(GradeUpdate {
                student_id,
                assignment_id,
                assignment_title: assignment_title.to_owned(),
                course_name: course_name.to_owned(),
                grade,
                timestamp: iso_timestamp(Utc::now()),
            })
            .await
    }

    async fn enrollment_changed(
        &self,
        student_id: i64,
        course_id: i64,
        course_name: &str,
        action: EnrollmentAction,
    ) -> Result<(), GatewayError> {
        self.gateway
            .emit_enrollment_update(EnrollmentUpdate {
                student_id,
                course_id,
                course_name: course_name.to_owned(),
                action,
                timestamp: iso_timestamp(Utc::now()),
            })
            .await
    }
}
