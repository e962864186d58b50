use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Links a student to a course. At most one row per (student, course); the unique
/// index on that pair is the final word when two enrollments race.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(db: &DbConn, student_id: i64, course_id: i64) -> Result<Model, DbErr> {
        let enrollment = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            enrolled_at: Set(Utc::now()),
            ..Default::default()
        };

        enrollment.insert(db).await
    }

    pub async fn find(db: &DbConn, student_id: i64, course_id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await
    }

    pub async fn is_enrolled(db: &DbConn, student_id: i64, course_id: i64) -> Result<bool, DbErr> {
        Ok(Self::find(db, student_id, course_id).await?.is_some())
    }

    pub async fn delete(db: &DbConn, id: i64) -> Result<(), DbErr> {
        Entity::delete_by_id(id).exec(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{course, user};
    use crate::test_utils::setup_test_db;
    use util::roles::Role;

    #[tokio::test]
    async fn test_unique_student_course_pair() {
        let db = setup_test_db().await;
        let lecturer = user::Model::create(&db, "l@uni.test", "L", Role::Lecturer)
            .await
            .unwrap();
        let student = user::Model::create(&db, "s@uni.test", "S", Role::Student)
            .await
            .unwrap();
        let course = course::Model::create(&db, "Databases", 12, None, lecturer.id)
            .await
            .unwrap();

        let first = Model::create(&db, student.id, course.id).await.unwrap();
        assert!(Model::is_enrolled(&db, student.id, course.id).await.unwrap());

        let err = Model::create(&db, student.id, course.id)
            .await
            .expect_err("second enrollment must violate the unique index");
        assert!(matches!(
            err.sql_err(),
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ));

        Model::delete(&db, first.id).await.unwrap();
        assert!(!Model::is_enrolled(&db, student.id, course.id).await.unwrap());
    }
}
