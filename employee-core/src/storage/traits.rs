use crate::common::error::Result;
use crate::domain::Employee;
use async_trait::async_trait;
use uuid::Uuid;

/// Read side of employee persistence plus the entry point for writes.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>>;

    /// One page of employees, most recently updated first. `page` is 1-based.
    async fn get_all(&self, page: u32, page_size: u32) -> Result<Vec<Employee>>;

    async fn total_count(&self) -> Result<u64>;

    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// Case-insensitive match on the email address.
    async fn email_exists(&self, email: &str, exclude_id: Option<Uuid>) -> Result<bool>;

    /// Match on the document digits; punctuation in `document` is ignored.
    async fn document_exists(&self, document: &str, exclude_id: Option<Uuid>) -> Result<bool>;

    /// Start a request-scoped unit of work.
    fn begin(&self) -> Box<dyn UnitOfWork>;
}

/// A staged write against the store.
#[derive(Debug, Clone)]
pub enum Change {
    Insert(Employee),
    Update(Employee),
    /// Soft delete: the row stays, flagged inactive.
    Deactivate(Uuid),
}

/// Collects changes and applies them atomically on `save_changes`.
/// Dropping a unit of work without saving discards what it staged.
#[async_trait]
pub trait UnitOfWork: Send {
    fn stage(&mut self, change: Change);

    fn pending(&self) -> usize;

    /// Apply every staged change in one transaction, returning how many were applied.
    /// The staged changes are consumed whether or not the save succeeds.
    async fn save_changes(&mut self) -> Result<usize>;

    fn add(&mut self, employee: Employee) {
        self.stage(Change::Insert(employee));
    }

    fn update(&mut self, employee: Employee) {
        self.stage(Change::Update(employee));
    }

    fn delete(&mut self, id: Uuid) {
        self.stage(Change::Deactivate(id));
    }

    fn has_changes(&self) -> bool {
        self.pending() > 0
    }
}

pub(crate) fn page_offset(page: u32, page_size: u32) -> usize {
    (page.max(1) as usize - 1) * page_size as usize
}
