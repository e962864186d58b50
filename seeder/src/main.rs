use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    assignment::AssignmentSeeder, assignment_submission::AssignmentSubmissionSeeder,
    course::CourseSeeder, enrollment::EnrollmentSeeder, user::UserSeeder,
};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = db::connect().await.expect("Failed to connect to database");

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(CourseSeeder), "Course"),
        (Box::new(AssignmentSeeder), "Assignment"),
        (Box::new(EnrollmentSeeder), "Enrollment"),
        (Box::new(AssignmentSubmissionSeeder), "AssignmentSubmission"),
    ] {
        run_seeder(&*seeder, name, &db).await;
    }
}
