use super::{load, save_update};
use crate::app::commands::UpdateEmployeeCommand;
use crate::app::validation::validate;
use crate::app::CommandHandler;
use crate::metrics::{self, MetricName};
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::{Email, EmployeeError, Money, PersonName, Result};
use std::sync::Arc;
use tracing::info;

pub struct UpdateEmployeeHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl UpdateEmployeeHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<UpdateEmployeeCommand> for UpdateEmployeeHandler {
    type Output = ();

    async fn handle(&self, command: UpdateEmployeeCommand) -> Result<()> {
        validate(&command)?;

        let mut employee = load(self.repository.as_ref(), command.id).await?;

        if self
            .repository
            .email_exists(&command.email, Some(command.id))
            .await?
        {
            return Err(EmployeeError::conflict(
                "Employee.EmailInUse",
                "Email is already in use by another employee",
            ));
        }

        employee.update(
            PersonName::new(&command.first_name, &command.last_name)?,
            Email::new(&command.email)?,
            command.birth_date,
            &command.position,
            Money::new(command.salary, &command.currency)?,
        )?;

        save_update(self.repository.as_ref(), employee).await?;

        metrics::increment(MetricName::EmployeesUpdated);
        info!(employee_id = %command.id, "Employee updated");
        Ok(())
    }
}
