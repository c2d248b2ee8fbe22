use crate::app::commands::CreateEmployeeCommand;
use crate::app::responses::EmployeeResponse;
use crate::app::validation::validate;
use crate::app::CommandHandler;
use crate::metrics::{self, MetricName};
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::{Document, Email, Employee, EmployeeError, Money, PersonName, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Registers a new employee after checking email and document are free.
pub struct CreateEmployeeHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl CreateEmployeeHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<CreateEmployeeCommand> for CreateEmployeeHandler {
    type Output = EmployeeResponse;

    async fn handle(&self, command: CreateEmployeeCommand) -> Result<EmployeeResponse> {
        validate(&command)?;

        if self.repository.email_exists(&command.email, None).await? {
            debug!("Rejected create: email {} already registered", command.email);
            return Err(EmployeeError::conflict(
                "Employee.EmailInUse",
                "Email is already in use by another employee",
            ));
        }
        if self.repository.document_exists(&command.document, None).await? {
            debug!("Rejected create: document already registered");
            return Err(EmployeeError::conflict(
                "Employee.DocumentInUse",
                "Document is already in use by another employee",
            ));
        }

        let employee = Employee::create(
            PersonName::new(&command.first_name, &command.last_name)?,
            Email::new(&command.email)?,
            command.birth_date,
            Document::new(&command.document)?,
            &command.position,
            Money::new(command.salary, &command.currency)?,
        )?;

        let mut uow = self.repository.begin();
        uow.add(employee.clone());
        uow.save_changes().await?;

        metrics::increment(MetricName::EmployeesCreated);
        info!(employee_id = %employee.id(), "Employee created");
        Ok(EmployeeResponse::from(&employee))
    }
}
