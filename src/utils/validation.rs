use crate::utils::error::{InsightError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 閉區間檢查；NaN 一律視為超出範圍
pub fn in_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(InsightError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(InsightError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Value must be unique".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range() {
        assert!(in_range(0.0, 0.0, 100.0));
        assert!(in_range(100.0, 0.0, 100.0));
        assert!(!in_range(-0.1, 0.0, 100.0));
        assert!(!in_range(f64::NAN, 0.0, 100.0));
        assert!(!in_range(f64::INFINITY, -1.0, 1.0));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("logging.format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("logging.format", "pretty", &["compact", "json"]).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("cohorts.id", ["whanauA", "whanauB"]).is_ok());
        assert!(validate_unique("cohorts.id", ["whanauA", "whanauA"]).is_err());
    }
}
