use crate::constants::{MAX_BLOCK_NAME_LEN, MAX_DURATION_MINUTES, MAX_ROUTINE_NAME_LEN, MIN_DURATION_MINUTES};
use crate::error::RoutineError;

/// Validate a block duration in minutes.
pub fn validate_duration_minutes(minutes: u32) -> Result<u32, RoutineError> {
    if (MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(RoutineError::InvalidDuration { minutes })
    }
}

/// Clamp a duration into the permitted range.
///
/// For stepper-style input widgets only; the model itself rejects
/// out-of-range values instead of clamping them.
pub fn clamp_duration_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
}

fn validate_name<'a>(field: &'static str, name: &'a str, max_len: usize) -> Result<&'a str, RoutineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RoutineError::InvalidInput {
            field,
            reason: "cannot be empty".into(),
        });
    }
    if name.chars().count() > max_len {
        return Err(RoutineError::InvalidInput {
            field,
            reason: format!("cannot exceed {max_len} characters"),
        });
    }
    Ok(name)
}

/// Validate a block name. Returns the trimmed name.
pub fn validate_block_name(name: &str) -> Result<&str, RoutineError> {
    validate_name("block name", name, MAX_BLOCK_NAME_LEN)
}

/// Validate a routine name. Returns the trimmed name.
pub fn validate_routine_name(name: &str) -> Result<&str, RoutineError> {
    validate_name("routine name", name, MAX_ROUTINE_NAME_LEN)
}
