use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Lifecycle of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Default)]
#[serde(rename_all = "snake_case")]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "submission_status_type"
)]
pub enum SubmissionStatus {
    /// Handed in, waiting for a grade.
    #[default]
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "graded")]
    Graded,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status_str = match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
        };
        write!(f, "{}", status_str)
    }
}

/// A student's submission for an assignment.
///
/// There is at most one row per (assignment, student). `grade` stays `None` until a
/// grader records one; a recorded `0.0` is a real grade.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "assignment_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub submission_text: Option<String>,
    pub file_url: Option<String>,
    /// On the assignment's scale: points when `max_points` is set, otherwise percent.
    pub grade: Option<f64>,
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub graded_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id"
    )]
    Assignment,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DbConn,
        assignment_id: i64,
        student_id: i64,
        submission_text: Option<&str>,
        file_url: Option<&str>,
    ) -> Result<Model, DbErr> {
        let submission = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            submission_text: Set(submission_text.map(str::to_owned)),
            file_url: Set(file_url.map(str::to_owned)),
            grade: Set(None),
            feedback: Set(None),
            status: Set(SubmissionStatus::Submitted),
            submitted_at: Set(Utc::now()),
            graded_at: Set(None),
            ..Default::default()
        };

        submission.insert(db).await
    }

    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Loads a submission together with its assignment.
    pub async fn find_with_assignment(
        db: &DbConn,
        id: i64,
    ) -> Result<Option<(Model, Option<super::assignment::Model>)>, DbErr> {
        Entity::find_by_id(id)
            .find_also_related(super::assignment::Entity)
            .one(db)
            .await
    }

    pub async fn find_for(
        db: &DbConn,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(db)
            .await
    }

    /// A student's submissions across the given assignments.
    pub async fn find_for_student(
        db: &DbConn,
        student_id: i64,
        assignment_ids: Vec<i64>,
    ) -> Result<Vec<Model>, DbErr> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::AssignmentId.is_in(assignment_ids))
            .all(db)
            .await
    }

    /// Replaces the content of an ungraded submission and stamps a new submission time.
    pub async fn resubmit(
        db: &DbConn,
        id: i64,
        submission_text: Option<&str>,
        file_url: Option<&str>,
    ) -> Result<Model, DbErr> {
        let submission = ActiveModel {
            id: Set(id),
            submission_text: Set(submission_text.map(str::to_owned)),
            file_url: Set(file_url.map(str::to_owned)),
            status: Set(SubmissionStatus::Submitted),
            submitted_at: Set(Utc::now()),
            ..Default::default()
        };

        submission.update(db).await
    }

    /// Records a grade and marks the submission graded.
    pub async fn record_grade(
        db: &DbConn,
        id: i64,
        grade: f64,
        feedback: Option<&str>,
    ) -> Result<Model, DbErr> {
        let mut submission = ActiveModel {
            id: Set(id),
            grade: Set(Some(grade)),
            status: Set(SubmissionStatus::Graded),
            graded_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        if let Some(feedback) = feedback {
            submission.feedback = Set(Some(feedback.to_owned()));
        }

        submission.update(db).await
    }

    pub fn is_graded(&self) -> bool {
        self.status == SubmissionStatus::Graded
    }
}
