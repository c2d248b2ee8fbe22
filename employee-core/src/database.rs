use crate::common::error::{EmployeeError, Result};
use rusqlite::{Connection, ErrorCode};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Owns the SQLite connection shared by every storage handle.
#[derive(Clone)]
pub struct DatabaseManager {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

pub(crate) fn sql_error(context: &str, err: rusqlite::Error) -> EmployeeError {
    if let rusqlite::Error::SqliteFailure(failure, _) = &err {
        if failure.code == ErrorCode::ConstraintViolation {
            return EmployeeError::conflict(
                "Employee.Duplicate",
                "Another employee already uses this email or document",
            );
        }
    }
    EmployeeError::database(format!("{context}: {err}"))
}

impl DatabaseManager {
    /// Open (or create) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                EmployeeError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        info!("Opening SQLite database at {}", path.display());
        let conn = Connection::open(&path).map_err(|e| sql_error("Failed to open database", e))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| sql_error("Failed to enable WAL", e))?;

        Self::with_conn(conn, Some(path))
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| sql_error("Failed to open in-memory database", e))?;
        Self::with_conn(conn, None)
    }

    fn with_conn(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .map_err(|e| sql_error("Failed to enable foreign keys", e))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against the connection on the blocking pool.
    pub async fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| EmployeeError::database("Database connection lock poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| EmployeeError::database(format!("Database task failed: {e}")))?
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        self.with_connection(|conn| {
            let migration_sql_001 = include_str!("../migrations/001_create_employees.sql");
            conn.execute_batch(migration_sql_001)
                .map_err(|e| sql_error("Failed to run employees migration", e))
        })
        .await?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Delete every employee and address row, keeping the schema.
    pub async fn clear_all_data(&self) -> Result<()> {
        self.with_connection(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| sql_error("Failed to start transaction", e))?;
            let addresses = tx
                .execute("DELETE FROM employee_addresses", [])
                .map_err(|e| sql_error("Failed to clear addresses", e))?;
            let employees = tx
                .execute("DELETE FROM employees", [])
                .map_err(|e| sql_error("Failed to clear employees", e))?;
            tx.commit()
                .map_err(|e| sql_error("Failed to commit clear", e))?;
            debug!(
                "Removed {} employee(s) and {} address(es)",
                employees, addresses
            );
            Ok(())
        })
        .await?;

        info!("Cleared all employee data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = DatabaseManager::open_in_memory().unwrap();
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();

        let tables: i64 = db
            .with_connection(|conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('employees', 'employee_addresses')",
                    [],
                    |row| row.get(0),
                )
                .map_err(|e| sql_error("count tables", e))
            })
            .await
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[tokio::test]
    async fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("employees.db");
        let db = DatabaseManager::open(&path).unwrap();
        db.run_migrations().await.unwrap();
        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
    }
}
