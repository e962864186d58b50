//! Role checks gating grading, enrollment and submission.
//!
//! Every function here is pure; callers look up whatever they need first.

use std::fmt;

use util::roles::Role;

use crate::error::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotCourseOwner,
    InsufficientRole,
    NotStudent,
    SubmitterNotStudent,
    NotEnrolled,
}

impl DenyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NotCourseOwner => "not course owner",
            DenyReason::InsufficientRole => "insufficient role",
            DenyReason::NotStudent => "user must have student role",
            DenyReason::SubmitterNotStudent => "only students can submit assignments",
            DenyReason::NotEnrolled => "student is not enrolled in this course",
        }
    }
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny(DenyReason),
}

impl AccessDecision {
    /// `Deny` becomes `ServiceError::Forbidden` carrying the reason.
    pub fn into_result(self) -> Result<(), ServiceError> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny(reason) => Err(ServiceError::Forbidden(reason.to_string())),
        }
    }
}

/// Admins grade anywhere; lecturers only in the course they own.
pub fn authorize_grading(actor_role: Role, actor_id: i64, course_owner_id: i64) -> AccessDecision {
    match actor_role {
        Role::Admin => AccessDecision::Allow,
        Role::Lecturer if actor_id == course_owner_id => AccessDecision::Allow,
        Role::Lecturer => AccessDecision::Deny(DenyReason::NotCourseOwner),
        _ => AccessDecision::Deny(DenyReason::InsufficientRole),
    }
}

/// Only students can be enrolled.
pub fn authorize_enrollment(target_role: Role) -> AccessDecision {
    match target_role {
        Role::Student => AccessDecision::Allow,
        _ => AccessDecision::Deny(DenyReason::NotStudent),
    }
}

pub fn authorize_submission(actor_role: Role, is_enrolled: bool) -> AccessDecision {
    if actor_role != Role::Student {
        AccessDecision::Deny(DenyReason::SubmitterNotStudent)
    } else if !is_enrolled {
        AccessDecision::Deny(DenyReason::NotEnrolled)
    } else {
        AccessDecision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grading_matrix() {
        assert_eq!(authorize_grading(Role::Admin, 9, 1), AccessDecision::Allow);
        assert_eq!(authorize_grading(Role::Lecturer, 1, 1), AccessDecision::Allow);
        assert_eq!(
            authorize_grading(Role::Lecturer, 2, 1),
            AccessDecision::Deny(DenyReason::NotCourseOwner)
        );
        assert_eq!(
            authorize_grading(Role::Student, 1, 1),
            AccessDecision::Deny(DenyReason::InsufficientRole)
        );
    }

    #[test]
    fn enrollment_requires_student_target() {
        assert_eq!(authorize_enrollment(Role::Student), AccessDecision::Allow);
        for role in [Role::Lecturer, Role::Admin] {
            assert_eq!(
                authorize_enrollment(role),
                AccessDecision::Deny(DenyReason::NotStudent)
            );
        }
    }

    #[test]
    fn submission_requires_enrolled_student() {
        assert_eq!(authorize_submission(Role::Student, true), AccessDecision::Allow);
        assert_eq!(
            authorize_submission(Role::Student, false),
            AccessDecision::Deny(DenyReason::NotEnrolled)
        );
        assert_eq!(
            authorize_submission(Role::Admin, true),
            AccessDecision::Deny(DenyReason::SubmitterNotStudent)
        );
    }

    #[test]
    fn deny_maps_to_forbidden_with_reason() {
        let err = authorize_grading(Role::Lecturer, 2, 1).into_result().unwrap_err();
        match err {
            ServiceError::Forbidden(msg) => assert_eq!(msg, "not course owner"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(AccessDecision::Allow.into_result().is_ok());
    }
}
