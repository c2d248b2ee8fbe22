use super::{load, save_update};
use crate::app::commands::{AddEmployeeAddressCommand, RemoveEmployeeAddressCommand};
use crate::app::validation::validate;
use crate::app::CommandHandler;
use crate::metrics::{self, MetricName};
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::{Address, Result};
use std::sync::Arc;
use tracing::info;

pub struct AddEmployeeAddressHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl AddEmployeeAddressHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<AddEmployeeAddressCommand> for AddEmployeeAddressHandler {
    type Output = ();

    async fn handle(&self, command: AddEmployeeAddressCommand) -> Result<()> {
        validate(&command)?;

        let mut employee = load(self.repository.as_ref(), command.employee_id).await?;
        let address = Address::new(command.address.to_parts())?;
        let is_main = address.is_main();
        employee.add_address(address)?;
        save_update(self.repository.as_ref(), employee).await?;

        metrics::increment(MetricName::AddressesAdded);
        info!(employee_id = %command.employee_id, is_main, "Address added");
        Ok(())
    }
}

pub struct RemoveEmployeeAddressHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl RemoveEmployeeAddressHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<RemoveEmployeeAddressCommand> for RemoveEmployeeAddressHandler {
    type Output = ();

    async fn handle(&self, command: RemoveEmployeeAddressCommand) -> Result<()> {
        validate(&command)?;

        let mut employee = load(self.repository.as_ref(), command.employee_id).await?;
        let address = Address::new(command.address.to_parts())?;
        employee.remove_address(&address)?;
        save_update(self.repository.as_ref(), employee).await?;

        metrics::increment(MetricName::AddressesRemoved);
        info!(employee_id = %command.employee_id, "Address removed");
        Ok(())
    }
}
