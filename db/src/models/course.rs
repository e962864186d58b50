use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{LoaderTrait, QueryOrder};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A course owned by exactly one lecturer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub credits: i32,
    pub syllabus: Option<String>,
    /// The owning lecturer. Only this lecturer (or an admin) may grade in the course.
    pub lecturer_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::LecturerId",
        to = "super::user::Column::Id"
    )]
    Lecturer,
    #[sea_orm(has_many = "super::assignment::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollments,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lecturer.def()
    }
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A course together with its owner, its assignments and its enrollments.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CourseDetails {
    #[serde(flatten)]
    pub course: Model,
    pub lecturer: Option<super::user::Model>,
    pub assignments: Vec<super::assignment::Model>,
    pub enrollments: Vec<super::enrollment::Model>,
}

impl Model {
    pub async fn create(
        db: &DbConn,
        title: &str,
        credits: i32,
        syllabus: Option<&str>,
        lecturer_id: i64,
    ) -> Result<Model, DbErr> {
        let course = ActiveModel {
            title: Set(title.to_owned()),
            credits: Set(credits),
            syllabus: Set(syllabus.map(str::to_owned)),
            lecturer_id: Set(lecturer_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        course.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn get_all(db: &DbConn) -> Result<Vec<Model>, DbErr> {
        Entity::find().order_by_asc(Column::Id).all(db).await
    }

    /// Loads the related rows for each course, keeping the input order. Assignments
    /// come earliest due first.
    pub async fn with_details(db: &DbConn, courses: Vec<Model>) -> Result<Vec<CourseDetails>, DbErr> {
        let lecturers = courses.load_one(super::user::Entity, db).await?;
        let assignments = courses.load_many(super::assignment::Entity, db).await?;
        let enrollments = courses.load_many(super::enrollment::Entity, db).await?;

        Ok(courses
            .into_iter()
            .zip(lecturers)
            .zip(assignments)
            .zip(enrollments)
            .map(|(((course, lecturer), mut assignments), enrollments)| {
                assignments.sort_by(|a, b| a.due_date.cmp(&b.due_date).then(a.id.cmp(&b.id)));
                CourseDetails {
                    course,
                    lecturer,
                    assignments,
                    enrollments,
                }
            })
            .collect())
    }
}
