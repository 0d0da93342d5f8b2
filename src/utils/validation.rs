use crate::utils::error::{Result, SiteError};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // 固定的正規表達式，編譯不會失敗
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

pub fn validate_email(field_name: &str, email: &str, message: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(SiteError::validation(field_name, message))
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_min_length(field_name: &str, value: &str, min: usize, message: &str) -> Result<()> {
    if value.chars().count() < min {
        return Err(SiteError::validation(field_name, message));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
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
    // NaN 不在任何範圍內
    if !(value >= min && value <= max) {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("guide@travel.lk"));
        assert!(is_valid_email("a.b+c@sub.example.com"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("a@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_min_length_counts_chars() {
        assert!(validate_min_length("name", "Jo", 2, "too short").is_ok());
        assert!(validate_min_length("name", "J", 2, "too short").is_err());
        // 兩個多位元組字元
        assert!(validate_min_length("name", "සි", 2, "too short").is_ok());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("carousel.interval_ms", 5000, 1).is_ok());
        assert!(validate_positive_number("carousel.interval_ms", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("reveal.threshold", 0.1, 0.0, 1.0).is_ok());
        assert!(validate_range("reveal.threshold", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("reveal.threshold", f64::NAN, 0.0, 1.0).is_err());
    }
}
