use crate::common::error::{EmployeeError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName {
    first_name: String,
    last_name: String,
}

impl PersonName {
    pub fn new(first_name: &str, last_name: &str) -> Result<Self> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(EmployeeError::domain(
                "PersonName.FirstNameEmpty",
                "First name must not be empty",
            ));
        }

        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(EmployeeError::domain(
                "PersonName.LastNameEmpty",
                "Last name must not be empty",
            ));
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
