pub mod assignment;
pub mod assignment_submission;
pub mod course;
pub mod enrollment;
pub mod user;

pub use assignment::Entity as Assignment;
pub use assignment_submission::Entity as AssignmentSubmission;
pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use user::Entity as User;
