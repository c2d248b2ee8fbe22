use crate::common::constants::EMAIL_MAX_LENGTH;
use crate::common::error::{EmployeeError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Email address. Compared case-insensitively, displayed as entered.
#[derive(Debug, Clone)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(EmployeeError::domain("Email.Empty", "Email must not be empty"));
        }
        if value.chars().count() as u64 > EMAIL_MAX_LENGTH {
            return Err(EmployeeError::domain(
                "Email.TooLong",
                "Email must be at most 254 characters",
            ));
        }
        if !EMAIL_PATTERN.is_match(value) {
            return Err(EmployeeError::domain("Email.InvalidFormat", "Invalid email format"));
        }
        Ok(Self(value.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn normalized(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_addresses() {
        let email = Email::new("  ana.souza@example.com.br ").unwrap();
        assert_eq!(email.value(), "ana.souza@example.com.br");
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        let empty = Email::new("   ").unwrap_err();
        assert_eq!(empty.codes(), vec!["Email.Empty"]);

        for raw in ["plainaddress", "missing@tld", "two@@example.com", "sp ace@example.com"] {
            let err = Email::new(raw).unwrap_err();
            assert_eq!(err.codes(), vec!["Email.InvalidFormat"], "input: {raw}");
        }
    }

    #[test]
    fn rejects_overlong_addresses() {
        let local = "a".repeat(250);
        let err = Email::new(&format!("{local}@example.com")).unwrap_err();
        assert_eq!(err.codes(), vec!["Email.TooLong"]);
    }

    #[test]
    fn equality_ignores_case() {
        let a = Email::new("Ana@Example.com").unwrap();
        let b = Email::new("ana@example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Ana@Example.com");
    }

    #[test]
    fn only_ascii_letters_fold() {
        let upper = Email::new("JOSÉ@example.com").unwrap();
        assert_eq!(upper, Email::new("josÉ@example.com").unwrap());
        assert_ne!(upper, Email::new("josé@example.com").unwrap());
    }
}
