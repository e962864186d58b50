pub mod assignment;
pub mod assignment_submission;
pub mod course;
pub mod enrollment;
pub mod user;
