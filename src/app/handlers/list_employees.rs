use crate::app::queries::GetEmployeeListQuery;
use crate::app::responses::EmployeeListResponse;
use crate::app::QueryHandler;
use async_trait::async_trait;
use employee_core::storage::EmployeeRepository;
use employee_core::Result;
use std::sync::Arc;
use tracing::debug;

/// Pages through every employee, inactive ones included.
pub struct GetEmployeeListHandler {
    repository: Arc<dyn EmployeeRepository>,
}

impl GetEmployeeListHandler {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl QueryHandler<GetEmployeeListQuery> for GetEmployeeListHandler {
    type Output = EmployeeListResponse;

    async fn handle(&self, query: GetEmployeeListQuery) -> Result<EmployeeListResponse> {
        let (page, page_size) = query.normalized();
        let employees = self.repository.get_all(page, page_size).await?;
        let total_count = self.repository.total_count().await?;
        debug!(page, page_size, total_count, "Listed employees");

        Ok(EmployeeListResponse::new(
            &employees,
            total_count,
            page,
            page_size,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handlers::test_support::{create_command, repository};
    use crate::app::handlers::CreateEmployeeHandler;
    use crate::app::CommandHandler;

    #[tokio::test]
    async fn empty_store_gives_empty_page() {
        let list = GetEmployeeListHandler::new(repository())
            .handle(GetEmployeeListQuery::default())
            .await
            .unwrap();
        assert!(list.employees.is_empty());
        assert_eq!(list.total_count, 0);
        assert_eq!(list.page, 1);
        assert_eq!(list.page_size, 10);
        assert_eq!(list.total_pages, 0);
    }

    #[tokio::test]
    async fn pages_through_employees() {
        let repository = repository();
        let create = CreateEmployeeHandler::new(repository.clone());
        for (email, document) in [
            ("a@example.com", "52998224725"),
            ("b@example.com", "11144477735"),
            ("c@example.com", "12345678000195"),
        ] {
            create.handle(create_command(email, document)).await.unwrap();
        }

        let handler = GetEmployeeListHandler::new(repository);
        let first = handler
            .handle(GetEmployeeListQuery::new(1, 2))
            .await
            .unwrap();
        assert_eq!(first.employees.len(), 2);
        assert_eq!(first.total_count, 3);
        assert_eq!(first.total_pages, 2);

        let second = handler
            .handle(GetEmployeeListQuery::new(2, 2))
            .await
            .unwrap();
        assert_eq!(second.employees.len(), 1);
        assert_eq!(second.page, 2);
    }
}
