use crate::utils::error::{Result, SleftError};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SleftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SleftError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SleftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<()> {
    addr.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|e| SleftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid bind address: {}", e),
        })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SleftError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Request-side check: the field must be present and not whitespace-only.
/// Returns the trimmed value.
pub fn require_field<'a>(field_name: &str, value: &'a Option<String>) -> Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SleftError::validation(
            field_name,
            format!("{} is required", field_name),
        )),
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    if email_pattern().is_match(value.trim()) {
        Ok(())
    } else {
        Err(SleftError::validation(
            field_name,
            format!("{} must be a valid email address", field_name),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("search.endpoint", "https://google.serper.dev").is_ok());
        assert!(validate_url("search.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("search.endpoint", "").is_err());
        assert!(validate_url("search.endpoint", "invalid-url").is_err());
        assert!(validate_url("search.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("server.bind", "127.0.0.1:8080").is_ok());
        assert!(validate_socket_addr("server.bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("search.timeout_seconds", 10u64, 1, 120).is_ok());
        assert!(validate_range("search.timeout_seconds", 0u64, 1, 120).is_err());
        assert!(validate_range("search.timeout_seconds", 121u64, 1, 120).is_err());
    }

    #[test]
    fn test_require_field() {
        assert_eq!(
            require_field("location", &Some("  Austin, TX ".to_string())).unwrap(),
            "Austin, TX"
        );
        assert!(require_field("location", &Some("   ".to_string())).is_err());
        let err = require_field("specialty", &None).unwrap_err();
        assert_eq!(err.to_string(), "specialty is required");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "owner@clinic.com").is_ok());
        assert!(validate_email("email", "not-an-email").is_err());
        assert!(validate_email("email", "a@b").is_err());
    }
}
