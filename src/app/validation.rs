use chrono::{NaiveDate, Utc};
use employee_core::common::constants::{CNPJ_LENGTH, CPF_LENGTH, MINIMUM_AGE, MINIMUM_BIRTH_YEAR};
use employee_core::{age_on, Document, EmployeeError, ErrorDetail, Money, Result};
use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Run the derived rules and turn any failures into `EmployeeError::Validation`.
pub fn validate<T: Validate>(command: &T) -> Result<()> {
    command.validate().map_err(into_employee_error)
}

pub fn into_employee_error(errors: ValidationErrors) -> EmployeeError {
    let mut failures = Vec::new();
    collect(&errors, "", &mut failures);
    // Stable sort: rule order within a field is kept
    failures.sort_by(|a, b| a.0.cmp(&b.0));

    let details = failures
        .into_iter()
        .map(|(field, err)| {
            let message = err
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            ErrorDetail::new(err.code.to_string(), message)
        })
        .collect();

    EmployeeError::Validation(details)
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<(String, ValidationError)>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().cloned().map(|err| (path.clone(), err)));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

pub fn validate_birth_date(birth_date: &NaiveDate) -> std::result::Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    let earliest = NaiveDate::from_ymd_opt(MINIMUM_BIRTH_YEAR, 1, 1)
        .ok_or_else(|| rule("Employee.BirthDateTooOld", "Invalid minimum birth date"))?;

    if *birth_date < earliest {
        return Err(rule(
            "Employee.BirthDateTooOld",
            "Birth date cannot be before 1900-01-01",
        ));
    }
    if *birth_date >= today {
        return Err(rule(
            "Employee.BirthDateInFuture",
            "Birth date must be in the past",
        ));
    }
    if age_on(*birth_date, today) < MINIMUM_AGE as i32 {
        return Err(rule(
            "Employee.Underage",
            "Employee must be at least 18 years old",
        ));
    }
    Ok(())
}

pub fn validate_document(document: &str) -> std::result::Result<(), ValidationError> {
    if document.trim().is_empty() {
        return Err(rule("Document.Empty", "Document is required"));
    }
    let digits = Document::normalize(document).len();
    if digits != CPF_LENGTH && digits != CNPJ_LENGTH {
        return Err(rule(
            "Document.InvalidFormat",
            "Document must be a CPF (11 digits) or a CNPJ (14 digits)",
        ));
    }
    Ok(())
}

pub fn validate_salary(salary: &Decimal) -> std::result::Result<(), ValidationError> {
    // Checked at the precision it will be stored with
    if Money::round(*salary) <= Decimal::ZERO {
        return Err(rule(
            "Employee.SalaryNotPositive",
            "Salary must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_currency(currency: &str) -> std::result::Result<(), ValidationError> {
    let currency = currency.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(rule(
            "Money.InvalidCurrency",
            "Currency must be a 3-letter ISO code",
        ));
    }
    Ok(())
}
