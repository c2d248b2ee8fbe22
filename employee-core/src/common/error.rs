use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A single failure entry: a stable dotted code plus a human readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

fn join_details(details: &[ErrorDetail]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum EmployeeError {
    #[error("Validation failed: {}", join_details(.0))]
    Validation(Vec<ErrorDetail>),

    #[error("{0}")]
    Domain(ErrorDetail),

    #[error("Employee {id} not found")]
    NotFound { id: Uuid },

    #[error("Conflict: {0}")]
    Conflict(ErrorDetail),

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmployeeError {
    pub fn domain(code: &str, message: &str) -> Self {
        EmployeeError::Domain(ErrorDetail::new(code, message))
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        EmployeeError::Conflict(ErrorDetail::new(code, message))
    }

    pub fn database(message: impl Into<String>) -> Self {
        EmployeeError::Database {
            message: message.into(),
        }
    }

    /// Flattens the error into the list of entries reported to API callers.
    pub fn details(&self) -> Vec<ErrorDetail> {
        match self {
            EmployeeError::Validation(details) => details.clone(),
            EmployeeError::Domain(detail) | EmployeeError::Conflict(detail) => vec![detail.clone()],
            EmployeeError::NotFound { .. } => vec![ErrorDetail::new(
                "Employee.NotFound",
                "Employee not found",
            )],
            EmployeeError::Database { .. } | EmployeeError::Json(_) => vec![ErrorDetail::new(
                "Internal",
                "An unexpected error occurred",
            )],
        }
    }

    pub fn codes(&self) -> Vec<String> {
        self.details().into_iter().map(|d| d.code).collect()
    }
}

pub type Result<T> = std::result::Result<T, EmployeeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_entry() {
        let err = EmployeeError::Validation(vec![
            ErrorDetail::new("FirstName.Length", "too short"),
            ErrorDetail::new("Salary.NotPositive", "must be positive"),
        ]);

        assert_eq!(err.codes(), vec!["FirstName.Length", "Salary.NotPositive"]);
        assert!(err.to_string().contains("FirstName.Length: too short"));
    }

    #[test]
    fn database_errors_are_not_leaked() {
        let err = EmployeeError::database("disk I/O error at /var/lib/x");
        let details = err.details();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].code, "Internal");
        assert!(!details[0].message.contains("disk"));
    }
}
