use crate::utils::error::{RankError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RankError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RankError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_not_empty<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(RankError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    for value in values {
        if !allowed.contains(&value.as_str()) {
            return Err(RankError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: value.clone(),
                reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
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
        return Err(RankError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./out").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("reference_year", 2026, 2000, 2099).is_ok());
        assert!(validate_range("reference_year", 1999, 2000, 2099).is_err());
        assert!(validate_range("multiplier", 1.2, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_one_of() {
        let formats = vec!["text".to_string(), "csv".to_string()];
        assert!(validate_one_of("formats", &formats, &["text", "json", "csv"]).is_ok());
        let bad = vec!["xml".to_string()];
        assert!(validate_one_of("formats", &bad, &["text", "json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        let empty: Vec<String> = vec![];
        assert!(matches!(
            validate_not_empty("files", &empty),
            Err(RankError::MissingConfigError { .. })
        ));
    }
}
