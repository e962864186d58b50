//! Weighted course-grade aggregation.
//!
//! The final grade is normalized against the weight that has actually been graded,
//! so a course with ungraded work reports a grade for what is known so far rather
//! than penalizing missing grades as zeros.

use sea_orm::{DatabaseConnection, DbErr};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{assignment, assignment_submission};

/// One assignment's contribution to a course grade.
///
/// `grade` is a percentage (0–100); `None` means not yet graded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentGrade {
    pub assignment_id: i64,
    pub title: String,
    pub weight: f64,
    pub grade: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseGrade {
    /// `None` until at least one weighted assignment has been graded.
    pub final_grade: Option<f64>,
    /// Sum of all assignment weights, graded or not.
    pub total_weight: f64,
    pub graded_weight: f64,
    pub per_assignment: Vec<AssignmentGrade>,
}

/// Helper to compute percentage safely.
pub fn percentage(earned: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        (earned * 100.0) / total
    }
}

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Negative or non-finite weights contribute nothing, so the result stays within the
/// range of the grades.
pub fn compute_course_grade(assignments: Vec<AssignmentGrade>) -> CourseGrade {
    let mut total_weight = 0.0;
    let mut graded_weight = 0.0;
    let mut weighted_score_sum = 0.0;

    for a in &assignments {
        if !a.weight.is_finite() || a.weight < 0.0 {
            tracing::warn!(assignment_id = a.assignment_id, weight = a.weight, "Ignoring invalid assignment weight");
            continue;
        }
        total_weight += a.weight;
        if let Some(grade) = a.grade {
            graded_weight += a.weight;
            weighted_score_sum += grade * a.weight / 100.0;
        }
    }

    let final_grade = if graded_weight > 0.0 {
        Some(round2(weighted_score_sum / graded_weight * 100.0))
    } else {
        None
    };

    CourseGrade {
        final_grade,
        total_weight,
        graded_weight,
        per_assignment: assignments,
    }
}

/// Builds the course grade for one student from the stored assignments and
/// submissions. Point-scale grades are converted to percentages first.
pub async fn load_course_grade(
    db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
) -> Result<CourseGrade, DbErr> {
    let assignments = assignment::Model::find_by_course(db, course_id).await?;
    let ids = assignments.iter().map(|a| a.id).collect();

    let grades: HashMap<i64, f64> =
        assignment_submission::Model::find_for_student(db, student_id, ids)
            .await?
            .into_iter()
            .filter_map(|s| s.grade.map(|g| (s.assignment_id, g)))
            .collect();

    let lines = assignments
        .into_iter()
        .map(|a| {
            let grade = grades.get(&a.id).map(|&g| match a.max_points {
                Some(max) => percentage(g, max),
                None => g,
            });
            AssignmentGrade {
                assignment_id: a.id,
                title: a.title,
                weight: a.weight,
                grade,
            }
        })
        .collect();

    Ok(compute_course_grade(lines))
}
