use crate::seed::Seeder;
use db::models::user::Model;
use fake::{
    Fake,
    faker::{internet::en::SafeEmail, name::en::Name},
};
use sea_orm::DatabaseConnection;
use std::pin::Pin;
use util::roles::Role;

pub struct UserSeeder;

impl Seeder for UserSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let mut accounts = vec![
                ("admin@example.com".to_string(), "Admin".to_string(), Role::Admin),
                ("lecturer@example.com".to_string(), "Lecturer".to_string(), Role::Lecturer),
                ("student@example.com".to_string(), "Student".to_string(), Role::Student),
            ];
            for (count, role) in [(3, Role::Lecturer), (20, Role::Student)] {
                for _ in 0..count {
                    accounts.push((SafeEmail().fake(), Name().fake(), role));
                }
            }

            for (email, name, role) in &accounts {
                // Random emails can collide; the unique index rejects the duplicate
                if let Err(err) = Model::create(db, email, name, *role).await {
                    eprintln!("Failed to seed user {}: {}", email, err);
                }
            }
        })
    }
}
