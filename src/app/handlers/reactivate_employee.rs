use super::{load, save_update};
use crate::app::commands::ReactivateEmployeeCommand;
use crate::app::CommandHandler;
use crate::metrics::{self, MetricName};
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::Result;
use std::sync::Arc;
use tracing::info;

/// Reverses a soft delete.
pub struct ReactivateEmployeeHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl ReactivateEmployeeHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<ReactivateEmployeeCommand> for ReactivateEmployeeHandler {
    type Output = ();

    async fn handle(&self, command: ReactivateEmployeeCommand) -> Result<()> {
        let mut employee = load(self.repository.as_ref(), command.id).await?;
        employee.activate();
        save_update(self.repository.as_ref(), employee).await?;

        metrics::increment(MetricName::EmployeesReactivated);
        info!(employee_id = %command.id, "Employee reactivated");
        Ok(())
    }
}
