use crate::seed::Seeder;
use db::models::{assignment, assignment_submission::Model as AssignmentSubmissionModel, enrollment};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use sea_orm::{DatabaseConnection, EntityTrait};
use std::pin::Pin;

pub struct AssignmentSubmissionSeeder;

impl Seeder for AssignmentSubmissionSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

            let enrollments = enrollment::Entity::find()
                .all(db)
                .await
                .expect("Failed to fetch enrollments");

            for e in &enrollments {
                let assignments = assignment::Model::find_by_course(db, e.course_id)
                    .await
                    .expect("Failed to fetch assignments");

                for a in &assignments {
                    if !rng.gen_bool(0.8) {
                        continue;
                    }
                    let text = format!(
                        "Submission for {} by student {}",
                        a.title, e.student_id
                    );
                    let submission = match AssignmentSubmissionModel::create(
                        db,
                        a.id,
                        e.student_id,
                        Some(&text),
                        None,
                    )
                    .await
                    {
                        Ok(s) => s,
                        Err(err) => {
                            eprintln!(
                                "Failed to seed submission for assignment {} student {}: {}",
                                a.id, e.student_id, err
                            );
                            continue;
                        }
                    };

                    // Roughly two thirds get graded on the assignment's own scale
                    if rng.gen_bool(0.66) {
                        let grade = (rng.gen_range(0.4..=1.0) * a.grade_ceiling() * 10.0).round() / 10.0;
                        if let Err(err) = AssignmentSubmissionModel::record_grade(
                            db,
                            submission.id,
                            grade,
                            Some("Seeded feedback"),
                        )
                        .await
                        {
                            eprintln!(
                                "Failed to seed grade for submission {}: {}",
                                submission.id, err
                            );
                        }
                    }
                }
            }
        })
    }
}
