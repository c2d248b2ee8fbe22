use crate::common::constants::{CNPJ_LENGTH, CPF_LENGTH};
use crate::common::error::{EmployeeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which Brazilian taxpayer registry a document number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    /// Individual taxpayer, 11 digits.
    Cpf,
    /// Company taxpayer, 14 digits.
    Cnpj,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "CPF",
            DocumentKind::Cnpj => "CNPJ",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = EmployeeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "CPF" => Ok(DocumentKind::Cpf),
            "CNPJ" => Ok(DocumentKind::Cnpj),
            other => Err(EmployeeError::database(format!("Unknown document kind '{other}'"))),
        }
    }
}

/// CPF or CNPJ number, stored as digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    value: String,
    kind: DocumentKind,
}

impl Document {
    pub fn new(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(EmployeeError::domain("Document.Empty", "Document must not be empty"));
        }

        let digits = Self::normalize(raw);
        let kind = match digits.len() {
            CPF_LENGTH => DocumentKind::Cpf,
            CNPJ_LENGTH => DocumentKind::Cnpj,
            _ => {
                return Err(EmployeeError::domain(
                    "Document.InvalidFormat",
                    "Invalid document. Must be a CPF (11 digits) or a CNPJ (14 digits)",
                ))
            }
        };

        Ok(Self { value: digits, kind })
    }

    /// Strips punctuation so "123.456.789-09" and "12345678909" compare equal.
    pub fn normalize(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).collect()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_cpf_is_reduced_to_digits() {
        let doc = Document::new("123.456.789-09").unwrap();
        assert_eq!(doc.value(), "12345678909");
        assert_eq!(doc.kind(), DocumentKind::Cpf);
    }

    #[test]
    fn fourteen_digits_is_a_cnpj() {
        let doc = Document::new("12.345.678/0001-95").unwrap();
        assert_eq!(doc.value(), "12345678000195");
        assert_eq!(doc.kind(), DocumentKind::Cnpj);
        assert_eq!(doc.kind().to_string(), "CNPJ");
    }

    #[test]
    fn other_lengths_are_rejected() {
        for raw in ["1234567890", "123456789012", "abc"] {
            let err = Document::new(raw).unwrap_err();
            assert_eq!(err.codes(), vec!["Document.InvalidFormat"], "input: {raw}");
        }
        assert_eq!(Document::new("  ").unwrap_err().codes(), vec!["Document.Empty"]);
    }

    #[test]
    fn kind_round_trips_through_its_column_text() {
        assert_eq!("CPF".parse::<DocumentKind>().unwrap(), DocumentKind::Cpf);
        assert!("RG".parse::<DocumentKind>().is_err());
    }
}
