use thiserror::Error;

/// Failures on the real-time delivery path.
///
/// Callers on the grading/enrollment path log these and carry on.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to serialize notification: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("session {0} is closed")]
    SessionClosed(uuid::Uuid),
}
