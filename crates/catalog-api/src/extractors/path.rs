//! Typed path parameter helpers.

use catalog_core::error::AppError;

/// Parses a positive integer id from a path segment.
pub fn parse_id(s: &str) -> Result<i32, AppError> {
    match s.parse::<i32>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::validation(format!("Invalid id: {s}"))),
    }
}
