use crate::common::constants::{MINIMUM_AGE, MINIMUM_BIRTH_YEAR};
use crate::common::error::{EmployeeError, Result};
use crate::domain::value_objects::{Address, Document, Email, Money, PersonName};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

/// Employee aggregate. Owns its addresses and keeps exactly one of them
/// flagged as main whenever the list is non-empty.
#[derive(Debug, Clone)]
pub struct Employee {
    id: Uuid,
    name: PersonName,
    email: Email,
    birth_date: NaiveDate,
    document: Document,
    position: String,
    salary: Money,
    addresses: Vec<Address>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
}

/// Persisted state handed back by storage; bypasses creation checks.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub id: Uuid,
    pub name: PersonName,
    pub email: Email,
    pub birth_date: NaiveDate,
    pub document: Document,
    pub position: String,
    pub salary: Money,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Whole years between `birth_date` and `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

fn check_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<()> {
    let earliest = NaiveDate::from_ymd_opt(MINIMUM_BIRTH_YEAR, 1, 1)
        .ok_or_else(|| EmployeeError::domain("Employee.BirthDateTooOld", "Invalid minimum date"))?;
    if birth_date < earliest {
        return Err(EmployeeError::domain(
            "Employee.BirthDateTooOld",
            "Birth date cannot be before 1900-01-01",
        ));
    }
    if birth_date > today {
        return Err(EmployeeError::domain(
            "Employee.BirthDateInFuture",
            "Birth date cannot be in the future",
        ));
    }
    if age_on(birth_date, today) < MINIMUM_AGE as i32 {
        return Err(EmployeeError::domain(
            "Employee.Underage",
            "Employee must be at least 18 years old",
        ));
    }
    Ok(())
}

fn check_position(position: &str) -> Result<String> {
    let position = position.trim();
    if position.is_empty() {
        return Err(EmployeeError::domain(
            "Employee.PositionEmpty",
            "Position must not be empty",
        ));
    }
    Ok(position.to_string())
}

impl Employee {
    pub fn create(
        name: PersonName,
        email: Email,
        birth_date: NaiveDate,
        document: Document,
        position: &str,
        salary: Money,
    ) -> Result<Self> {
        Self::create_at(name, email, birth_date, document, position, salary, Utc::now())
    }

    pub fn create_at(
        name: PersonName,
        email: Email,
        birth_date: NaiveDate,
        document: Document,
        position: &str,
        salary: Money,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let position = check_position(position)?;
        check_birth_date(birth_date, now.date_naive())?;

        Ok(Self {
            id: Uuid::new_v4(),
            name,
            email,
            birth_date,
            document,
            position,
            salary,
            addresses: Vec::new(),
            created_at: now,
            updated_at: now,
            is_active: true,
        })
    }

    pub fn restore(record: EmployeeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            birth_date: record.birth_date,
            document: record.document,
            position: record.position,
            salary: record.salary,
            addresses: record.addresses,
            created_at: record.created_at,
            updated_at: record.updated_at,
            is_active: record.is_active,
        }
    }

    pub fn update(
        &mut self,
        name: PersonName,
        email: Email,
        birth_date: NaiveDate,
        position: &str,
        salary: Money,
    ) -> Result<()> {
        self.update_at(name, email, birth_date, position, salary, Utc::now())
    }

    pub fn update_at(
        &mut self,
        name: PersonName,
        email: Email,
        birth_date: NaiveDate,
        position: &str,
        salary: Money,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let position = check_position(position)?;
        check_birth_date(birth_date, now.date_naive())?;

        self.name = name;
        self.email = email;
        self.birth_date = birth_date;
        self.position = position;
        self.salary = salary;
        self.updated_at = now;
        Ok(())
    }

    pub fn add_address(&mut self, mut address: Address) -> Result<()> {
        if self.addresses.contains(&address) {
            return Err(EmployeeError::conflict(
                "Address.Duplicate",
                "Employee already has this address",
            ));
        }

        if self.addresses.is_empty() || address.is_main() {
            for existing in &mut self.addresses {
                existing.set_main(false);
            }
            address.set_main(true);
        }

        self.addresses.push(address);
        self.touch();
        Ok(())
    }

    pub fn remove_address(&mut self, address: &Address) -> Result<()> {
        let position = self
            .addresses
            .iter()
            .position(|a| a == address)
            .ok_or_else(|| EmployeeError::domain("Address.NotFound", "Address not found"))?;

        let removed = self.addresses.remove(position);
        if removed.is_main() {
            if let Some(first) = self.addresses.first_mut() {
                first.set_main(true);
            }
        }

        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn salary(&self) -> &Money {
        &self.salary
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn main_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_main())
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}
