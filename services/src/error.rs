use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failures surfaced by the grading and enrollment services.
///
/// Notification failures never appear here; they are logged and swallowed at the
/// service boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    /// Maps a failed insert to `Conflict` when a unique index rejected it.
    pub fn from_insert(err: DbErr, conflict: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(conflict.to_owned()),
            _ => ServiceError::Database(err),
        }
    }
}
