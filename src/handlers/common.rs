use crate::error::{AppError, AppResult};

/// The single pseudo-user every request is scoped to.
///
/// Real authentication is out of scope; repositories still take the user id
/// so the ownership checks stay in place.
pub const DEFAULT_USER_ID: i32 = 1;

/// Reject empty or over-long required string fields
pub fn validate_required(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Length-check an optional string field when present
pub fn validate_optional(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(value) = value {
        if value.len() > max_len {
            return Err(AppError::Validation(format!(
                "{field} must be at most {max_len} characters"
            )));
        }
    }
    Ok(())
}
