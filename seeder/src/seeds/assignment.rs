use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::{assignment, course};
use sea_orm::DatabaseConnection;
use std::pin::Pin;

pub struct AssignmentSeeder;

impl Seeder for AssignmentSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let courses = course::Model::get_all(db)
                .await
                .expect("Failed to fetch courses");

            for c in &courses {
                // Weights sum to 100 per course; the project is marked out of 50 points.
                let plan: [(&str, f64, Option<f64>); 3] = [
                    ("Practical 1", 20.0, None),
                    ("Practical 2", 30.0, None),
                    ("Project", 50.0, Some(50.0)),
                ];

                for (i, (title, weight, max_points)) in plan.into_iter().enumerate() {
                    let due = Utc::now() + Duration::days(7 * (i as i64 + 1));
                    if let Err(err) = assignment::Model::create(
                        db,
                        c.id,
                        title,
                        Some("Auto seeded"),
                        due,
                        weight,
                        max_points,
                    )
                    .await
                    {
                        eprintln!("Failed to seed assignment {} for course {}: {}", title, c.id, err);
                    }
                }
            }
        })
    }
}
