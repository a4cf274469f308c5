use crate::utils::error::{RegisterError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(RegisterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RegisterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegisterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a>(
    field_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RegisterError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(RegisterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses operator input as a score in `[0, 100]`.
pub fn parse_score(input: &str) -> Result<f64> {
    let invalid = || RegisterError::validation("Invalid score.");
    let score: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !score.is_finite() {
        return Err(invalid());
    }
    validate_range("score", score, 0.0, 100.0).map_err(|_| invalid())?;
    Ok(score)
}

/// Parses a 1-based menu selection into a 0-based index below `len`.
pub fn parse_selection(input: &str, len: usize) -> Result<usize> {
    let invalid = || RegisterError::InvalidSelection {
        input: input.trim().to_string(),
        max: len,
    };
    let number: usize = input.trim().parse().map_err(|_| invalid())?;
    if number == 0 || number > len {
        return Err(invalid());
    }
    Ok(number - 1)
}
