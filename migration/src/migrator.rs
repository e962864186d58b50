use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202509010001_create_users::Migration),
            Box::new(migrations::m202509010002_create_courses::Migration),
            Box::new(migrations::m202509010003_create_assignments::Migration),
            Box::new(migrations::m202509010004_create_assignment_submissions::Migration),
            Box::new(migrations::m202509010005_create_enrollments::Migration),
        ]
    }
}
