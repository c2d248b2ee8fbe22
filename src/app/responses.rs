use chrono::{DateTime, NaiveDate, Utc};
use employee_core::{Address, Employee};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_main: bool,
}

impl From<&Address> for AddressResponse {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street().to_string(),
            number: address.number().to_string(),
            complement: address.complement().map(str::to_string),
            neighborhood: address.neighborhood().to_string(),
            city: address.city().to_string(),
            state: address.state().to_string(),
            zip_code: address.zip_code().to_string(),
            country: address.country().to_string(),
            is_main: address.is_main(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub document: String,
    pub document_type: String,
    pub position: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    pub addresses: Vec<AddressResponse>,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            first_name: employee.name().first_name().to_string(),
            last_name: employee.name().last_name().to_string(),
            full_name: employee.name().full_name(),
            email: employee.email().value().to_string(),
            birth_date: employee.birth_date(),
            document: employee.document().value().to_string(),
            document_type: employee.document().kind().to_string(),
            position: employee.position().to_string(),
            salary: employee.salary().amount(),
            currency: employee.salary().currency().to_string(),
            created_at: employee.created_at(),
            updated_at: employee.updated_at(),
            is_active: employee.is_active(),
            addresses: employee.addresses().iter().map(AddressResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListItemResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub document: String,
    pub position: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    pub is_active: bool,
}

impl From<&Employee> for EmployeeListItemResponse {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id(),
            full_name: employee.name().full_name(),
            email: employee.email().value().to_string(),
            document: employee.document().value().to_string(),
            position: employee.position().to_string(),
            salary: employee.salary().amount(),
            is_active: employee.is_active(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListResponse {
    pub employees: Vec<EmployeeListItemResponse>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
}

impl EmployeeListResponse {
    pub fn new(employees: &[Employee], total_count: u64, page: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size as u64)
        };
        Self {
            employees: employees.iter().map(EmployeeListItemResponse::from).collect(),
            total_count,
            page,
            page_size,
            total_pages,
        }
    }
}
