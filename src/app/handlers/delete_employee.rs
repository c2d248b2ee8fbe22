use crate::app::commands::DeleteEmployeeCommand;
use crate::app::CommandHandler;
use crate::metrics::{self, MetricName};
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::{EmployeeError, Result};
use std::sync::Arc;
use tracing::info;

/// Soft-deletes an employee. Deleting an inactive employee succeeds.
pub struct DeleteEmployeeHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl DeleteEmployeeHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<DeleteEmployeeCommand> for DeleteEmployeeHandler {
    type Output = ();

    async fn handle(&self, command: DeleteEmployeeCommand) -> Result<()> {
        if !self.repository.exists(command.id).await? {
            return Err(EmployeeError::NotFound { id: command.id });
        }

        let mut uow = self.repository.begin();
        uow.delete(command.id);
        uow.save_changes().await?;

        metrics::increment(MetricName::EmployeesDeactivated);
        info!(employee_id = %command.id, "Employee deactivated");
        Ok(())
    }
}
