use crate::seed::Seeder;
use db::models::{course, enrollment, user};
use rand::Rng;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::pin::Pin;
use util::roles::Role;

pub struct EnrollmentSeeder;

impl Seeder for EnrollmentSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::from_rng(OsRng).expect("Failed to seed RNG");

            let students = user::Entity::find()
                .filter(user::Column::Role.eq(Role::Student))
                .all(db)
                .await
                .expect("Failed to fetch students");
            let courses = course::Model::get_all(db)
                .await
                .expect("Failed to fetch courses");

            for student in &students {
                for c in &courses {
                    // The fixed student is in every course
                    if student.email == "student@example.com" || rng.gen_bool(0.5) {
                        if let Err(err) = enrollment::Model::create(db, student.id, c.id).await {
                            eprintln!(
                                "Failed to enroll student {} in course {}: {}",
                                student.id, c.id, err
                            );
                        }
                    }
                }
            }
        })
    }
}
