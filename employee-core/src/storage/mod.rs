pub mod in_memory;
pub mod traits;

#[cfg(feature = "db")]
pub mod database;

pub use in_memory::InMemoryStorage;
pub use traits::{Change, EmployeeRepository, UnitOfWork};

#[cfg(feature = "db")]
pub use database::DatabaseStorage;
