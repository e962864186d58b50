pub mod assignment_service;
pub mod course_service;
pub mod error;
pub mod notification_service;
pub mod policy;

pub use assignment_service::{AssignmentService, GradeReport};
pub use course_service::CourseService;
pub use error::ServiceError;
pub use notification_service::{NotificationService, Notifier};
