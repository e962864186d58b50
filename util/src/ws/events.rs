//! Notification payloads.
//!
//! Field names and the `type` tag are part of the client contract and must not change.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::rooms::{NotificationKind, Room};
use crate::roles::Role;

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2025-03-01T10:15:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeUpdate {
    pub student_id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub course_name: String,
    pub grade: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentAction {
    Enrolled,
    Unenrolled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentUpdate {
    pub student_id: i64,
    pub course_id: i64,
    pub course_name: String,
    pub action: EnrollmentAction,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NotificationEvent {
    GradeUpdate(GradeUpdate),
    EnrollmentUpdate(EnrollmentUpdate),
}

impl NotificationEvent {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationEvent::GradeUpdate(_) => NotificationKind::GradeUpdate,
            NotificationEvent::EnrollmentUpdate(_) => NotificationKind::EnrollmentUpdate,
        }
    }

    pub fn student_id(&self) -> i64 {
        match self {
            NotificationEvent::GradeUpdate(g) => g.student_id,
            NotificationEvent::EnrollmentUpdate(e) => e.student_id,
        }
    }

    /// Every event goes to the affected student plus all lecturers and all admins.
    pub fn target_rooms(&self) -> [Room; 3] {
        [
            Room::User(self.student_id()),
            Room::Role(Role::Lecturer),
            Room::Role(Role::Admin),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn grade_update_wire_shape() {
        let ev = NotificationEvent::GradeUpdate(GradeUpdate {
            student_id: 5,
            assignment_id: 9,
            assignment_title: "Lab 1".into(),
            course_name: "Intro to CS".into(),
            grade: 92.5,
            timestamp: "2025-03-01T10:15:00.000Z".into(),
        });

        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({
                "type": "gradeUpdate",
                "studentId": 5,
                "assignmentId": 9,
                "assignmentTitle": "Lab 1",
                "courseName": "Intro to CS",
                "grade": 92.5,
                "timestamp": "2025-03-01T10:15:00.000Z"
            })
        );
    }

    #[test]
    fn enrollment_update_wire_shape() {
        let ev = NotificationEvent::EnrollmentUpdate(EnrollmentUpdate {
            student_id: 5,
            course_id: 3,
            course_name: "Discrete Maths".into(),
            action: EnrollmentAction::Unenrolled,
            timestamp: "2025-03-01T10:15:00.000Z".into(),
        });

        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({
                "type": "enrollmentUpdate",
                "studentId": 5,
                "courseId": 3,
                "courseName": "Discrete Maths",
                "action": "unenrolled",
                "timestamp": "2025-03-01T10:15:00.000Z"
            })
        );
    }

    #[test]
    fn timestamps_use_millisecond_zulu_format() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2025-03-01T10:15:00.000Z");
    }

    #[test]
    fn fan_out_targets_student_lecturers_and_admins() {
        let ev = NotificationEvent::EnrollmentUpdate(EnrollmentUpdate {
            student_id: 8,
            course_id: 1,
            course_name: "c".into(),
            action: EnrollmentAction::Enrolled,
            timestamp: String::new(),
        });
        let paths: Vec<String> = ev.target_rooms().iter().map(Room::path).collect();
        assert_eq!(paths, vec!["user:8", "role:lecturer", "role:admin"]);
    }
}
