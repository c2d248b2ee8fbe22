pub mod create_employee;
pub mod delete_employee;
pub mod employee_addresses;
pub mod get_employee;
pub mod list_employees;
pub mod reactivate_employee;
pub mod update_employee;

pub use create_employee::CreateEmployeeHandler;
pub use delete_employee::DeleteEmployeeHandler;
pub use employee_addresses::{AddEmployeeAddressHandler, RemoveEmployeeAddressHandler};
pub use get_employee::GetEmployeeByIdHandler;
pub use list_employees::GetEmployeeListHandler;
pub use reactivate_employee::ReactivateEmployeeHandler;
pub use update_employee::UpdateEmployeeHandler;

use employee_core::storage::EmployeeRepository;
use employee_core::{Employee, EmployeeError, Result};
use std::sync::Arc;
use uuid::Uuid;

/// Every handler, wired to one repository.
pub struct Handlers {
    pub create_employee: CreateEmployeeHandler,
    pub update_employee: UpdateEmployeeHandler,
    pub delete_employee: DeleteEmployeeHandler,
    pub reactivate_employee: ReactivateEmployeeHandler,
    pub add_address: AddEmployeeAddressHandler,
    pub remove_address: RemoveEmployeeAddressHandler,
    pub get_employee: GetEmployeeByIdHandler,
    pub list_employees: GetEmployeeListHandler,
}

impl Handlers {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self {
            create_employee: CreateEmployeeHandler::new(repository.clone()),
            update_employee: UpdateEmployeeHandler::new(repository.clone()),
            delete_employee: DeleteEmployeeHandler::new(repository.clone()),
            reactivate_employee: ReactivateEmployeeHandler::new(repository.clone()),
            add_address: AddEmployeeAddressHandler::new(repository.clone()),
            remove_address: RemoveEmployeeAddressHandler::new(repository.clone()),
            get_employee: GetEmployeeByIdHandler::new(repository.clone()),
            list_employees: GetEmployeeListHandler::new(repository),
        }
    }
}

pub(crate) async fn load(repository: &dyn EmployeeRepository, id: Uuid) -> Result<Employee> {
    repository
        .get_by_id(id)
        .await?
        .ok_or(EmployeeError::NotFound { id })
}

/// Stage `employee` as updated and commit.
pub(crate) async fn save_update(repository: &dyn EmployeeRepository, employee: Employee) -> Result<()> {
    let mut uow = repository.begin();
    uow.update(employee);
    uow.save_changes().await?;
    Ok(())
}
