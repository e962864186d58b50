use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A weighted assignment within a course.
///
/// `weight` is a percentage contribution (0–100). Weights within a course are not
/// required to sum to 100; aggregation normalizes against the weight actually graded.
/// When `max_points` is set, grades are recorded on a point scale and converted to a
/// percentage before aggregation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub weight: f64,
    pub max_points: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
    #[sea_orm(has_many = "super::assignment_submission::Entity")]
    Submissions,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::assignment_submission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates an assignment. `weight` must be a finite value in 0..=100 and
    /// `max_points`, when given, a finite positive value.
    pub async fn create(
        db: &DbConn,
        course_id: i64,
        title: &str,
        description: Option<&str>,
        due_date: DateTime<Utc>,
        weight: f64,
        max_points: Option<f64>,
    ) -> Result<Model, DbErr> {
        if !weight.is_finite() || !(0.0..=100.0).contains(&weight) {
            return Err(DbErr::Custom(format!(
                "assignment weight must be between 0 and 100, got {weight}"
            )));
        }
        if let Some(max) = max_points.filter(|m| !m.is_finite() || *m <= 0.0) {
            return Err(DbErr::Custom(format!(
                "max_points must be positive, got {max}"
            )));
        }

        let assignment = ActiveModel {
            course_id: Set(course_id),
            title: Set(title.to_owned()),
            description: Set(description.map(str::to_owned)),
            due_date: Set(due_date),
            weight: Set(weight),
            max_points: Set(max_points),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        assignment.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All assignments of a course, earliest due first.
    pub async fn find_by_course(db: &DbConn, course_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    /// Upper bound for a recorded grade: `max_points` on a point scale, otherwise 100.
    pub fn grade_ceiling(&self) -> f64 {
        self.max_points.unwrap_or(100.0)
    }
}
