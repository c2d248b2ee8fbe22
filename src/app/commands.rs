use crate::app::validation::{validate_birth_date, validate_currency, validate_document, validate_salary};
use chrono::NaiveDate;
use employee_core::common::constants::*;
use employee_core::AddressParts;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Body ids are optional: absent, `null` and the nil UUID all read as nil.
fn optional_id<'de, D>(deserializer: D) -> Result<Uuid, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Uuid>::deserialize(deserializer)?.unwrap_or_else(Uuid::nil))
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeCommand {
    #[validate(length(
        min = 2,
        max = NAME_MAX_LENGTH,
        code = "Employee.FirstNameLength",
        message = "First name must have between 2 and 50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 2,
        max = NAME_MAX_LENGTH,
        code = "Employee.LastNameLength",
        message = "Last name must have between 2 and 50 characters"
    ))]
    pub last_name: String,

    #[validate(
        email(code = "Email.InvalidFormat", message = "Email is invalid"),
        length(
            max = EMAIL_MAX_LENGTH,
            code = "Email.TooLong",
            message = "Email must have at most 254 characters"
        )
    )]
    pub email: String,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: NaiveDate,

    #[validate(custom(function = "validate_document"))]
    pub document: String,

    #[validate(length(
        min = 2,
        max = POSITION_MAX_LENGTH,
        code = "Employee.PositionLength",
        message = "Position must have between 2 and 100 characters"
    ))]
    pub position: String,

    #[validate(custom(function = "validate_salary"))]
    pub salary: Decimal,

    #[serde(default = "default_currency")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,
}

/// Replaces the mutable employee fields. The document cannot change.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeCommand {
    /// Taken from the route; a nil id in the body means "not supplied".
    #[serde(default, deserialize_with = "optional_id")]
    pub id: Uuid,

    #[validate(length(
        min = 2,
        max = NAME_MAX_LENGTH,
        code = "Employee.FirstNameLength",
        message = "First name must have between 2 and 50 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 2,
        max = NAME_MAX_LENGTH,
        code = "Employee.LastNameLength",
        message = "Last name must have between 2 and 50 characters"
    ))]
    pub last_name: String,

    #[validate(
        email(code = "Email.InvalidFormat", message = "Email is invalid"),
        length(
            max = EMAIL_MAX_LENGTH,
            code = "Email.TooLong",
            message = "Email must have at most 254 characters"
        )
    )]
    pub email: String,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: NaiveDate,

    #[validate(length(
        min = 2,
        max = POSITION_MAX_LENGTH,
        code = "Employee.PositionLength",
        message = "Position must have between 2 and 100 characters"
    ))]
    pub position: String,

    #[validate(custom(function = "validate_salary"))]
    pub salary: Decimal,

    #[serde(default = "default_currency")]
    #[validate(custom(function = "validate_currency"))]
    pub currency: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DeleteEmployeeCommand {
    pub id: Uuid,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReactivateEmployeeCommand {
    pub id: Uuid,
}

/// Postal fields shared by the add and remove address commands.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressFields {
    #[validate(length(
        min = 1,
        max = STREET_MAX_LENGTH,
        code = "Address.StreetLength",
        message = "Street is required and must have at most 100 characters"
    ))]
    pub street: String,

    #[validate(length(
        min = 1,
        max = NUMBER_MAX_LENGTH,
        code = "Address.NumberLength",
        message = "Number is required and must have at most 20 characters"
    ))]
    pub number: String,

    #[serde(default)]
    #[validate(length(
        max = COMPLEMENT_MAX_LENGTH,
        code = "Address.ComplementLength",
        message = "Complement must have at most 100 characters"
    ))]
    pub complement: Option<String>,

    #[validate(length(
        min = 1,
        max = NEIGHBORHOOD_MAX_LENGTH,
        code = "Address.NeighborhoodLength",
        message = "Neighborhood is required and must have at most 100 characters"
    ))]
    pub neighborhood: String,

    #[validate(length(
        min = 1,
        max = CITY_MAX_LENGTH,
        code = "Address.CityLength",
        message = "City is required and must have at most 100 characters"
    ))]
    pub city: String,

    #[validate(length(
        min = 1,
        max = STATE_MAX_LENGTH,
        code = "Address.StateLength",
        message = "State is required and must have at most 50 characters"
    ))]
    pub state: String,

    #[validate(length(
        min = 1,
        max = ZIP_CODE_MAX_LENGTH,
        code = "Address.ZipCodeLength",
        message = "Zip code is required and must have at most 20 characters"
    ))]
    pub zip_code: String,

    #[serde(default = "default_country")]
    #[validate(length(
        min = 1,
        max = COUNTRY_MAX_LENGTH,
        code = "Address.CountryLength",
        message = "Country is required and must have at most 50 characters"
    ))]
    pub country: String,

    #[serde(default)]
    pub is_main: bool,
}

impl AddressFields {
    pub fn to_parts(&self) -> AddressParts {
        AddressParts {
            street: self.street.clone(),
            number: self.number.clone(),
            complement: self.complement.clone(),
            neighborhood: self.neighborhood.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: Some(self.country.clone()),
            is_main: self.is_main,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddEmployeeAddressCommand {
    /// Taken from the route; a nil id in the body means "not supplied".
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressFields,
}

/// Removes the address equal to the given postal fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RemoveEmployeeAddressCommand {
    #[serde(default, deserialize_with = "optional_id")]
    pub employee_id: Uuid,

    #[serde(flatten)]
    #[validate(nested)]
    pub address: AddressFields,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::validation::into_employee_error;
    use serde_json::json;

    fn create_body() -> serde_json::Value {
        json!({
            "firstName": "Maria",
            "lastName": "Silva",
            "email": "maria@example.com",
            "birthDate": "1990-05-17",
            "document": "529.982.247-25",
            "position": "Engineer",
            "salary": 8500.50
        })
    }

    #[test]
    fn create_command_defaults_currency() {
        let command: CreateEmployeeCommand = serde_json::from_value(create_body()).unwrap();
        assert_eq!(command.currency, "BRL");
        assert_eq!(command.salary, Decimal::new(850050, 2));
        assert!(command.validate().is_ok());
    }

    #[test]
    fn create_command_collects_every_failure() {
        let mut body = create_body();
        body["firstName"] = json!("M");
        body["email"] = json!("not-an-email");
        body["document"] = json!("123");
        body["salary"] = json!(0);
        let command: CreateEmployeeCommand = serde_json::from_value(body).unwrap();

        let err = into_employee_error(command.validate().unwrap_err());
        let mut codes = err.codes();
        codes.sort();
        assert_eq!(
            codes,
            vec![
                "Document.InvalidFormat",
                "Email.InvalidFormat",
                "Employee.FirstNameLength",
                "Employee.SalaryNotPositive",
            ]
        );
    }

    #[test]
    fn address_command_flattens_fields() {
        let command: AddEmployeeAddressCommand = serde_json::from_value(json!({
            "street": "Rua Augusta",
            "number": "100",
            "neighborhood": "Consolação",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "01305-000",
            "isMain": true
        }))
        .unwrap();

        assert!(command.employee_id.is_nil());
        assert_eq!(command.address.country, "Brasil");
        assert!(command.address.to_parts().is_main);
        assert!(command.validate().is_ok());
    }

    #[test]
    fn null_body_ids_read_as_not_supplied() {
        let command: RemoveEmployeeAddressCommand = serde_json::from_value(json!({
            "employeeId": null,
            "street": "Rua Augusta",
            "number": "100",
            "neighborhood": "Consolação",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "01305-000"
        }))
        .unwrap();
        assert!(command.employee_id.is_nil());

        let mut body = create_body();
        body["id"] = json!(null);
        let command: UpdateEmployeeCommand = serde_json::from_value(body).unwrap();
        assert!(command.id.is_nil());
    }

    #[test]
    fn address_command_rejects_missing_street() {
        let command: AddEmployeeAddressCommand = serde_json::from_value(json!({
            "street": "",
            "number": "100",
            "neighborhood": "Centro",
            "city": "Campinas",
            "state": "SP",
            "zipCode": "13010-000"
        }))
        .unwrap();

        let err = into_employee_error(command.validate().unwrap_err());
        assert_eq!(err.codes(), vec!["Address.StreetLength"]);
    }
}
