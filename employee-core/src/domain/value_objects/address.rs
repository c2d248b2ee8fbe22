use crate::common::constants::DEFAULT_COUNTRY;
use crate::common::error::{EmployeeError, Result};
use std::hash::{Hash, Hasher};

/// Raw postal fields used to build an [`Address`].
#[derive(Debug, Clone, Default)]
pub struct AddressParts {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: Option<String>,
    pub is_main: bool,
}

/// Postal address. The `is_main` flag is bookkeeping owned by the employee and
/// takes no part in equality.
#[derive(Debug, Clone)]
pub struct Address {
    street: String,
    number: String,
    complement: Option<String>,
    neighborhood: String,
    city: String,
    state: String,
    zip_code: String,
    country: String,
    is_main: bool,
}

fn required(value: &str, code: &str, message: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EmployeeError::domain(code, message));
    }
    Ok(value.to_string())
}

impl Address {
    pub fn new(parts: AddressParts) -> Result<Self> {
        let street = required(&parts.street, "Address.StreetEmpty", "Street must not be empty")?;
        let number = required(&parts.number, "Address.NumberEmpty", "Number must not be empty")?;
        let neighborhood = required(
            &parts.neighborhood,
            "Address.NeighborhoodEmpty",
            "Neighborhood must not be empty",
        )?;
        let city = required(&parts.city, "Address.CityEmpty", "City must not be empty")?;
        let state = required(&parts.state, "Address.StateEmpty", "State must not be empty")?;
        let zip_code = required(&parts.zip_code, "Address.ZipCodeEmpty", "Zip code must not be empty")?;

        let complement = parts
            .complement
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let country = parts
            .country
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_string());

        Ok(Self {
            street,
            number,
            complement,
            neighborhood,
            city,
            state,
            zip_code,
            country,
            is_main: parts.is_main,
        })
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }

    pub(crate) fn set_main(&mut self, is_main: bool) {
        self.is_main = is_main;
    }

    fn postal_fields(&self) -> (&str, &str, Option<&str>, &str, &str, &str, &str, &str) {
        (
            &self.street,
            &self.number,
            self.complement.as_deref(),
            &self.neighborhood,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        )
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.postal_fields() == other.postal_fields()
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.postal_fields().hash(state);
    }
}

#[cfg(test)]
pub(crate) fn sample_parts(street: &str) -> AddressParts {
    AddressParts {
        street: street.to_string(),
        number: "100".to_string(),
        complement: None,
        neighborhood: "Centro".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        zip_code: "01001-000".to_string(),
        country: None,
        is_main: false,
    }
}
