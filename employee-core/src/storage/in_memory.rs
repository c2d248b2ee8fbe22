use super::traits::{page_offset, Change, EmployeeRepository, UnitOfWork};
use crate::common::error::{EmployeeError, Result};
use crate::domain::{Document, Employee};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

type EmployeeMap = HashMap<Uuid, Employee>;

fn lock(employees: &Mutex<EmployeeMap>) -> Result<MutexGuard<'_, EmployeeMap>> {
    employees
        .lock()
        .map_err(|_| EmployeeError::database("In-memory store lock poisoned"))
}

/// In-memory storage implementation for development/testing
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    employees: Arc<Mutex<EmployeeMap>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStorage {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        Ok(lock(&self.employees)?.get(&id).cloned())
    }

    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Employee>> {
        let employees = lock(&self.employees)?;
        let mut all: Vec<Employee> = employees.values().cloned().collect();
        all.sort_by(|a, b| {
            b.updated_at()
                .cmp(&a.updated_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        Ok(all
            .into_iter()
            .skip(page_offset(page, page_size))
            .take(page_size as usize)
            .collect())
    }

    async fn total_count(&self) -> Result<u64> {
        Ok(lock(&self.employees)?.len() as u64)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(lock(&self.employees)?.contains_key(&id))
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let needle = email.trim().to_ascii_lowercase();
        Ok(lock(&self.employees)?
            .values()
            .filter(|e| Some(e.id()) != exclude_id)
            .any(|e| e.email().normalized() == needle))
    }

    async fn document_exists(&self, document: &str, exclude_id: Option<Uuid>) -> Result<bool> {
        let needle = Document::normalize(document);
        Ok(lock(&self.employees)?
            .values()
            .filter(|e| Some(e.id()) != exclude_id)
            .any(|e| e.document().value() == needle))
    }

    fn begin(&self) -> Box<dyn UnitOfWork> {
        Box::new(InMemoryUnitOfWork {
            employees: self.employees.clone(),
            changes: Vec::new(),
        })
    }
}

pub struct InMemoryUnitOfWork {
    employees: Arc<Mutex<EmployeeMap>>,
    changes: Vec<Change>,
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    fn stage(&mut self, change: Change) {
        self.changes.push(change);
    }

    fn pending(&self) -> usize {
        self.changes.len()
    }

    async fn save_changes(&mut self) -> Result<usize> {
        let changes = std::mem::take(&mut self.changes);
        let mut employees = lock(&self.employees)?;

        // Validate everything against a scratch copy first so a failing change
        // leaves the store untouched.
        let mut staged = employees.clone();
        for change in &changes {
            apply(&mut staged, change)?;
        }

        *employees = staged;
        let applied = changes.len();
        debug!("Applied {} staged change(s) to in-memory store", applied);
        Ok(applied)
    }
}

fn apply(employees: &mut EmployeeMap, change: &Change) -> Result<()> {
    match change {
        Change::Insert(employee) => {
            ensure_unique(employees, employee)?;
            employees.insert(employee.id(), employee.clone());
        }
        Change::Update(employee) => {
            if !employees.contains_key(&employee.id()) {
                return Err(EmployeeError::NotFound { id: employee.id() });
            }
            ensure_unique(employees, employee)?;
            employees.insert(employee.id(), employee.clone());
        }
        Change::Deactivate(id) => {
            // Missing rows are ignored, matching the SQL UPDATE semantics
            if let Some(employee) = employees.get_mut(id) {
                employee.deactivate();
            }
        }
    }
    Ok(())
}

fn ensure_unique(employees: &EmployeeMap, candidate: &Employee) -> Result<()> {
    let clash = employees.values().any(|e| {
        e.id() != candidate.id()
            && (e.email() == candidate.email() || e.document() == candidate.document())
    });
    if clash {
        return Err(EmployeeError::conflict(
            "Employee.Duplicate",
            "Another employee already uses this email or document",
        ));
    }
    Ok(())
}
