use super::traits::{page_offset, Change, EmployeeRepository, UnitOfWork};
use crate::common::error::{EmployeeError, Result};
use crate::database::{sql_error, DatabaseManager};
use crate::domain::*;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

const EMPLOYEE_COLUMNS: &str = "id, first_name, last_name, email, birth_date, document, \
     document_type, position, salary_amount, salary_currency, created_at, updated_at, is_active";

const ADDRESS_COLUMNS: &str =
    "street, number, complement, neighborhood, city, state, zip_code, country, is_main";

/// SQLite-backed storage with employees and addresses in separate tables
#[derive(Clone)]
pub struct DatabaseStorage {
    db: DatabaseManager,
}

impl DatabaseStorage {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    /// Open the database file, apply migrations and wrap it.
    pub async fn connect(path: &str) -> Result<Self> {
        let db = DatabaseManager::open(path)?;
        db.run_migrations().await?;
        info!("Employee storage ready at {}", path);
        Ok(Self::new(db))
    }

    pub fn manager(&self) -> &DatabaseManager {
        &self.db
    }
}

/// Column values exactly as stored, before domain validation.
struct EmployeeRow {
    id: String,
    first_name: String,
    last_name: String,
    email: String,
    birth_date: String,
    document: String,
    document_type: String,
    position: String,
    salary_amount: String,
    salary_currency: String,
    created_at: String,
    updated_at: String,
    is_active: bool,
}

impl EmployeeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            birth_date: row.get(4)?,
            document: row.get(5)?,
            document_type: row.get(6)?,
            position: row.get(7)?,
            salary_amount: row.get(8)?,
            salary_currency: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
            is_active: row.get(12)?,
        })
    }

    fn into_employee(self, addresses: Vec<Address>) -> Result<Employee> {
        let id = Uuid::parse_str(&self.id).map_err(|e| corrupt("id", &self.id, e))?;
        let document = Document::new(&self.document).map_err(|e| corrupt("document", &self.id, e))?;
        let kind = DocumentKind::from_str(&self.document_type)?;
        if kind != document.kind() {
            return Err(EmployeeError::database(format!(
                "Employee {} has document type {} but a {} number",
                self.id,
                kind,
                document.kind()
            )));
        }
        let amount = Decimal::from_str(&self.salary_amount)
            .map_err(|e| corrupt("salary_amount", &self.id, e))?;

        Ok(Employee::restore(EmployeeRecord {
            id,
            name: PersonName::new(&self.first_name, &self.last_name)
                .map_err(|e| corrupt("name", &self.id, e))?,
            email: Email::new(&self.email).map_err(|e| corrupt("email", &self.id, e))?,
            birth_date: NaiveDate::parse_from_str(&self.birth_date, "%Y-%m-%d")
                .map_err(|e| corrupt("birth_date", &self.id, e))?,
            document,
            position: self.position,
            salary: Money::new(amount, &self.salary_currency)
                .map_err(|e| corrupt("salary", &self.id, e))?,
            addresses,
            created_at: parse_timestamp(&self.created_at).map_err(|e| corrupt("created_at", &self.id, e))?,
            updated_at: parse_timestamp(&self.updated_at).map_err(|e| corrupt("updated_at", &self.id, e))?,
            is_active: self.is_active,
        }))
    }
}

fn corrupt(field: &str, id: &str, err: impl std::fmt::Display) -> EmployeeError {
    EmployeeError::database(format!("Invalid {field} stored for employee {id}: {err}"))
}

fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
}

// Fixed-width UTC so lexical order in SQL matches chronological order
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn address_from_row(row: &Row<'_>) -> rusqlite::Result<AddressParts> {
    Ok(AddressParts {
        street: row.get(0)?,
        number: row.get(1)?,
        complement: row.get(2)?,
        neighborhood: row.get(3)?,
        city: row.get(4)?,
        state: row.get(5)?,
        zip_code: row.get(6)?,
        country: row.get(7)?,
        is_main: row.get(8)?,
    })
}

fn load_addresses(conn: &Connection, employee_id: &str) -> Result<Vec<Address>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM employee_addresses WHERE employee_id = ?1 ORDER BY position"
        ))
        .map_err(|e| sql_error("Failed to prepare address query", e))?;
    let parts = stmt
        .query_map(params![employee_id], address_from_row)
        .map_err(|e| sql_error("Failed to query addresses", e))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| sql_error("Failed to read address row", e))?;

    parts
        .into_iter()
        .map(|p| Address::new(p).map_err(|e| corrupt("address", employee_id, e)))
        .collect()
}

fn hydrate(conn: &Connection, rows: Vec<EmployeeRow>) -> Result<Vec<Employee>> {
    rows.into_iter()
        .map(|row| {
            let addresses = load_addresses(conn, &row.id)?;
            row.into_employee(addresses)
        })
        .collect()
}

fn insert_addresses(conn: &Connection, employee: &Employee) -> Result<()> {
    let mut stmt = conn
        .prepare(&format!(
            "INSERT INTO employee_addresses (employee_id, position, {ADDRESS_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        ))
        .map_err(|e| sql_error("Failed to prepare address insert", e))?;

    let employee_id = employee.id().to_string();
    for (position, address) in employee.addresses().iter().enumerate() {
        stmt.execute(params![
            employee_id,
            position as i64,
            address.street(),
            address.number(),
            address.complement(),
            address.neighborhood(),
            address.city(),
            address.state(),
            address.zip_code(),
            address.country(),
            address.is_main(),
        ])
        .map_err(|e| sql_error("Failed to insert address", e))?;
    }
    Ok(())
}

fn insert_employee(conn: &Connection, employee: &Employee) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO employees ({EMPLOYEE_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ),
        params![
            employee.id().to_string(),
            employee.name().first_name(),
            employee.name().last_name(),
            employee.email().value(),
            employee.birth_date().format("%Y-%m-%d").to_string(),
            employee.document().value(),
            employee.document().kind().as_str(),
            employee.position(),
            employee.salary().amount().to_string(),
            employee.salary().currency(),
            format_timestamp(employee.created_at()),
            format_timestamp(employee.updated_at()),
            employee.is_active(),
        ],
    )
    .map_err(|e| sql_error("Failed to insert employee", e))?;

    insert_addresses(conn, employee)
}

fn update_employee(conn: &Connection, employee: &Employee) -> Result<()> {
    let id = employee.id().to_string();
    let updated = conn
        .execute(
            "UPDATE employees SET first_name = ?2, last_name = ?3, email = ?4, birth_date = ?5,
                 position = ?6, salary_amount = ?7, salary_currency = ?8, updated_at = ?9, is_active = ?10
             WHERE id = ?1",
            params![
                id,
                employee.name().first_name(),
                employee.name().last_name(),
                employee.email().value(),
                employee.birth_date().format("%Y-%m-%d").to_string(),
                employee.position(),
                employee.salary().amount().to_string(),
                employee.salary().currency(),
                format_timestamp(employee.updated_at()),
                employee.is_active(),
            ],
        )
        .map_err(|e| sql_error("Failed to update employee", e))?;
    if updated == 0 {
        return Err(EmployeeError::NotFound { id: employee.id() });
    }

    // Addresses are owned by the employee: replace the whole set
    conn.execute(
        "DELETE FROM employee_addresses WHERE employee_id = ?1",
        params![id],
    )
    .map_err(|e| sql_error("Failed to clear addresses", e))?;
    insert_addresses(conn, employee)
}

fn deactivate_employee(conn: &Connection, id: Uuid) -> Result<()> {
    conn.execute(
        "UPDATE employees SET is_active = 0, updated_at = ?2 WHERE id = ?1",
        params![id.to_string(), format_timestamp(Utc::now())],
    )
    .map_err(|e| sql_error("Failed to deactivate employee", e))?;
    Ok(())
}

#[async_trait]
impl EmployeeRepository for DatabaseStorage {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        debug!("Loading employee {}", id);
        self.db
            .with_connection(move |conn| {
                let row = conn
                    .query_row(
                        &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
                        params![id.to_string()],
                        EmployeeRow::from_row,
                    )
                    .optional()
                    .map_err(|e| sql_error("Failed to query employee", e))?;

                match row {
                    Some(row) => Ok(hydrate(conn, vec![row])?.pop()),
                    None => Ok(None),
                }
            })
            .await
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Employee>> {
        let offset = page_offset(page, page_size) as i64;
        self.db
            .with_connection(move |conn| {
                let rows = {
                    let mut stmt = conn
                        .prepare(&format!(
                            "SELECT {EMPLOYEE_COLUMNS} FROM employees
                             ORDER BY updated_at DESC, id ASC LIMIT ?1 OFFSET ?2"
                        ))
                        .map_err(|e| sql_error("Failed to prepare employee list", e))?;
                    let rows = stmt
                        .query_map(params![page_size as i64, offset], EmployeeRow::from_row)
                        .map_err(|e| sql_error("Failed to list employees", e))?
                        .collect::<rusqlite::Result<Vec<_>>>()
                        .map_err(|e| sql_error("Failed to read employee row", e))?;
                    rows
                };
                hydrate(conn, rows)
            })
            .await
    }

    async fn total_count(&self) -> Result<u64> {
        self.db
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get::<_, i64>(0))
                    .map(|n| n as u64)
                    .map_err(|e| sql_error("Failed to count employees", e))
            })
            .await
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        self.db
            .with_connection(move |conn| {
                conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1)",
                    params![id.to_string()],
                    |row| row.get(0),
                )
                .map_err(|e| sql_error("Failed to check employee", e))
            })
            .await
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let email = email.trim().to_string();
        let exclude = exclude_id.map(|id| id.to_string());
        self.db
            .with_connection(move |conn| {
                conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM employees
                     WHERE email = ?1 COLLATE NOCASE AND (?2 IS NULL OR id <> ?2))",
                    params![email, exclude],
                    |row| row.get(0),
                )
                .map_err(|e| sql_error("Failed to check email", e))
            })
            .await
    }

    async fn document_exists(&self, document: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let document = Document::normalize(document);
        let exclude = exclude_id.map(|id| id.to_string());
        self.db
            .with_connection(move |conn| {
                conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM employees
                     WHERE document = ?1 AND (?2 IS NULL OR id <> ?2))",
                    params![document, exclude],
                    |row| row.get(0),
                )
                .map_err(|e| sql_error("Failed to check document", e))
            })
            .await
    }

    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(DatabaseUnitOfWork {
            db: self.db.clone(),
            changes: Vec::new(),
        })
    }
}

pub struct DatabaseUnitOfWork {
    db: DatabaseManager,
    changes: Vec<Change>,
}

#[async_trait]
impl UnitOfWork for DatabaseUnitOfWork {
    fn stage(&mut self, change: Change) {
        self.changes.push(change);
    }

    fn pending(&self) -> usize {
        self.changes.len()
    }

    async fn save_changes(&mut self) -> Result<usize> {
        if self.changes.is_empty() {
            return Ok(0);
        }

        let changes = std::mem::take(&mut self.changes);
        let applied = changes.len();
        self.db
            .with_connection(move |conn| {
                let tx = conn
                    .transaction()
                    .map_err(|e| sql_error("Failed to start transaction", e))?;
                for change in &changes {
                    match change {
                        Change::Insert(employee) => insert_employee(&tx, employee)?,
                        Change::Update(employee) => update_employee(&tx, employee)?,
                        Change::Deactivate(id) => deactivate_employee(&tx, *id)?,
                    }
                }
                // Dropping `tx` on an early return rolls everything back
                tx.commit()
                    .map_err(|e| sql_error("Failed to commit changes", e))
            })
            .await?;

        debug!("Committed {} staged change(s)", applied);
        Ok(applied)
    }
}
