use crate::seed::Seeder;
use db::models::{course, user};
use rand::rngs::{OsRng, StdRng};
use rand::{SeedableRng, seq::SliceRandom};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::pin::Pin;
use util::roles::Role;

pub struct CourseSeeder;

impl Seeder for CourseSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            // Use a Send-compatible RNG
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

            let lecturers = user::Entity::find()
                .filter(user::Column::Role.eq(Role::Lecturer))
                .all(db)
                .await
                .expect("Failed to fetch lecturers");
            if lecturers.is_empty() {
                panic!("No lecturers found; seed users first");
            }

            let credit_options = [8, 16, 24];
            let titles = [
                "Data Structures",
                "Operating Systems",
                "Distributed Systems",
                "Computer Graphics",
                "Software Engineering",
                "Compiler Construction",
            ];

            for title in titles {
                let lecturer = lecturers.choose(&mut rng).expect("non-empty");
                let credits = *credit_options.choose(&mut rng).expect("non-empty");
                let syllabus = format!("Introduction to {}", title.to_lowercase());
                if let Err(err) =
                    course::Model::create(db, title, credits, Some(&syllabus), lecturer.id).await
                {
                    eprintln!("Failed to seed course {}: {}", title, err);
                }
            }
        })
    }
}
