use thiserror::Error;
use uuid::Uuid;

/// Routine model error type
#[derive(Debug, Error)]
pub enum RoutineError {
    #[error("index {index} is out of range for {len} entries")]
    OutOfRange { index: usize, len: usize },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("duration must be 1-60 minutes, got {minutes}")]
    InvalidDuration { minutes: u32 },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

impl RoutineError {
    /// Stable tag used when the error crosses the bridge.
    pub fn kind(&self) -> &'static str {
        match self {
            RoutineError::OutOfRange { .. } => "out_of_range",
            RoutineError::NotFound { .. } => "not_found",
            RoutineError::InvalidDuration { .. } => "invalid_duration",
            RoutineError::InvalidInput { .. } => "invalid_input",
            RoutineError::Json(_) => "malformed_message",
        }
    }
}

// For host-facing returns - converts RoutineError to String
impl From<RoutineError> for String {
    fn from(e: RoutineError) -> Self {
        e.to_string()
    }
}

/// Check that `index` addresses one of `len` entries.
pub fn check_index(index: usize, len: usize) -> Result<(), RoutineError> {
    if index < len {
        Ok(())
    } else {
        Err(RoutineError::OutOfRange { index, len })
    }
}
