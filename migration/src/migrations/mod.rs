pub mod m202509010001_create_users;
pub mod m202509010002_create_courses;
pub mod m202509010003_create_assignments;
pub mod m202509010004_create_assignment_submissions;
pub mod m202509010005_create_enrollments;
