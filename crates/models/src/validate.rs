//! Field validators shared by the entities.
//!
//! Each returns the normalised value ready to store, or a
//! `ModelError::Validation` describing what is wrong with it.

use crate::errors::ModelError;

/// Trim and bound a required text field. Length counts characters, not bytes.
pub fn required_text(raw: &str, max: usize) -> Result<String, ModelError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ModelError::Validation("must not be empty".into()));
    }
    if trimmed.chars().count() > max {
        return Err(ModelError::Validation(format!("must be at most {max} characters")));
    }
    Ok(trimmed.to_string())
}

pub fn finite_number(v: f64) -> Result<f64, ModelError> {
    if !v.is_finite() {
        return Err(ModelError::Validation("must be a finite number".into()));
    }
    Ok(v)
}
