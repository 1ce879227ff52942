use crate::utils::error::{Result, SiteError, ValidationError};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Two-part `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn validate_email(value: &str) -> std::result::Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

pub fn validate_required(
    field: &'static str,
    value: &str,
) -> std::result::Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so check containment rather than exclusion
    if !(value >= min && value <= max) {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_selector(field_name: &str, selector: &str) -> Result<()> {
    validate_non_empty_string(field_name, selector)?;
    if selector.chars().any(char::is_whitespace) {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: selector.to_string(),
            reason: "Only simple `#id`, `.class` or tag selectors are supported".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("noatsign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spa ce@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_required_allows_whitespace() {
        assert!(validate_required("firstName", "Jane").is_ok());
        assert!(validate_required("firstName", "  ").is_ok());
        assert_eq!(
            validate_required("firstName", ""),
            Err(ValidationError::MissingField { field: "firstName" })
        );
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("reveal.threshold", 0.1, 0.0, 1.0).is_ok());
        assert!(validate_range("reveal.threshold", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("scroll.navbar_threshold", f64::NAN, 0.0, f64::MAX).is_err());
    }

    #[test]
    fn test_validate_selector() {
        assert!(validate_selector("scroll.navbar_selector", ".navbar").is_ok());
        assert!(validate_selector("scroll.navbar_selector", "").is_err());
        assert!(validate_selector("scroll.navbar_selector", "nav .item").is_err());
    }
}
