//! Application layer: commands and queries, their validation rules and the
//! handlers that drive the domain model through the repository.

pub mod commands;
pub mod handlers;
pub mod queries;
pub mod responses;
pub mod validation;

use async_trait::async_trait;
use employee_core::Result;

pub use handlers::Handlers;

/// Executes a state-changing command.
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Send + 'static,
{
    type Output: Send;

    async fn handle(&self, command: C) -> Result<Self::Output>;
}

/// Answers a read-only query.
#[async_trait]
pub trait QueryHandler<Q>: Send + Sync
where
    Q: Send + 'static,
{
    type Output: Send;

    async fn handle(&self, query: Q) -> Result<Self::Output>;
}
