use once_cell::sync::Lazy;
use regex::Regex;

use crate::application::errors::{ServiceError, ServiceResult};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("valid email regex")
});

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 128;

pub fn email(value: &str) -> ServiceResult<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ServiceError::invalid("Invalid email address"))
    }
}

pub fn username(value: &str) -> ServiceResult<()> {
    length("Username", value, USERNAME_MIN, USERNAME_MAX)
}

pub fn password(value: &str) -> ServiceResult<()> {
    length("Password", value, PASSWORD_MIN, PASSWORD_MAX)
}

/// Character count of `value` must lie in `min..=max`.
pub fn length(field: &str, value: &str, min: usize, max: usize) -> ServiceResult<()> {
    let n = value.chars().count();
    if n < min {
        if min == 1 {
            return Err(ServiceError::invalid(format!("{field} is required")));
        }
        return Err(ServiceError::invalid(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if n > max {
        return Err(ServiceError::invalid(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn max_length(field: &str, value: &str, max: usize) -> ServiceResult<()> {
    length(field, value, 0, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(email("diner@campus.edu").is_ok());
        assert!(email("first.last+tag@mail.example.co").is_ok());
        assert!(email("no-at-sign").is_err());
        assert!(email("a@b").is_err());
        assert!(email("").is_err());
    }

    #[test]
    fn length_bounds() {
        assert!(username("ab").is_err());
        assert!(username("abc").is_ok());
        assert!(username(&"x".repeat(51)).is_err());
        assert!(password("12345").is_err());
        assert!(password("123456").is_ok());
        let err = length("Mess name", "", 1, 100).unwrap_err();
        assert_eq!(err.to_string(), "Mess name is required");
        assert!(max_length("Address", &"a".repeat(500), 500).is_ok());
        assert!(max_length("Address", &"a".repeat(501), 500).is_err());
    }
}
