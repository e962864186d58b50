//! Typed broadcast rooms.
//!
//! Room names are derived from typed identifiers so callers never build the
//! `user:{id}` / `role:{role}` / `event:{name}` strings by hand.

use std::fmt;

use crate::roles::Role;

/// The closed set of notification kinds clients may subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    GradeUpdate,
    EnrollmentUpdate,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 2] = [
        NotificationKind::GradeUpdate,
        NotificationKind::EnrollmentUpdate,
    ];

    /// Wire name, also used as the event name on outgoing frames.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::GradeUpdate => "gradeUpdate",
            NotificationKind::EnrollmentUpdate => "enrollmentUpdate",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Room {
    User(i64),
    Role(Role),
    Event(NotificationKind),
}

impl Room {
    pub fn path(&self) -> String {
        match self {
            Room::User(id) => format!("user:{id}"),
            Room::Role(role) => format!("role:{}", role.as_str()),
            Room::Event(kind) => format!("event:{}", kind.as_str()),
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_paths() {
        assert_eq!(Room::User(17).path(), "user:17");
        assert_eq!(Room::Role(Role::Lecturer).path(), "role:lecturer");
        assert_eq!(
            Room::Event(NotificationKind::EnrollmentUpdate).path(),
            "event:enrollmentUpdate"
        );
    }

    #[test]
    fn kinds_resolve_only_from_exact_names() {
        assert_eq!(
            NotificationKind::from_name("gradeUpdate"),
            Some(NotificationKind::GradeUpdate)
        );
        assert_eq!(NotificationKind::from_name("GradeUpdate"), None);
        assert_eq!(NotificationKind::from_name("chat"), None);
    }
}
