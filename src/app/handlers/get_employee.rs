use super::load;
use crate::app::queries::GetEmployeeByIdQuery;
use crate::app::responses::EmployeeResponse;
use crate::app::QueryHandler;
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::Result;
use std::sync::Arc;

pub struct GetEmployeeByIdHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl GetEmployeeByIdHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryHandler<GetEmployeeByIdQuery> for GetEmployeeByIdHandler {
    type Output = EmployeeResponse;

    async fn handle(&self, query: GetEmployeeByIdQuery) -> Result<EmployeeResponse> {
        let employee = load(self.repository.as_ref(), query.id).await?;
        Ok(EmployeeResponse::from(&employee))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_support::{repository, seed};
    use employee_core::EmployeeError;
    use uuid::Uuid;

    #[tokio::test]
    async fn returns_the_stored_employee() {
        let repository = repository();
        let created = seed(&repository).await;

        let found = GetEmployeeByIdHandler::new(repository)
            .handle(GetEmployeeByIdQuery { id: created.id })
            .await
            .unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, "maria@example.com");
        assert_eq!(found.salary, created.salary);
    }

    #[tokio::test]
    async fn missing_employee_maps_to_not_found_code() {
        let err = GetEmployeeByIdHandler::new(repository())
            .handle(GetEmployeeByIdQuery { id: Uuid::new_v4() })
            .await
            .unwrap_err();
        assert!(matches!(err, EmployeeError::NotFound { .. }));
        assert_eq!(err.codes(), vec!["Employee.NotFound"]);
    }
}
