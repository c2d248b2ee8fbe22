use crate::api::{self, employees, AppState};
use crate::app::Handlers;
use crate::config::{Config, StorageBackend};
use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use employee_core::storage::{DatabaseStorage, EmployeeRepository, InMemoryStorage};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the router for the employee API.
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health))
        .route("/metrics", get(api::metrics))
        .route(
            "/api/employees",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/api/employees/:id",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route(
            "/api/employees/:id/addresses",
            post(employees::add_address).delete(employees::remove_address),
        )
        .route(
            "/api/employees/:id/activate",
            post(employees::reactivate_employee),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Open the configured repository, running migrations for SQLite.
pub async fn open_repository(config: &Config) -> anyhow::Result<Arc<dyn EmployeeRepository>> {
    match config.database.backend {
        StorageBackend::Memory => {
            info!("Using in-memory employee storage");
            Ok(Arc::new(InMemoryStorage::new()))
        }
        StorageBackend::Sqlite => {
            let storage = DatabaseStorage::connect(&config.database.path)
                .await
                .with_context(|| format!("Failed to open database at {}", config.database.path))?;
            Ok(Arc::new(storage))
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let repository = open_repository(config).await?;
    let metrics = if config.metrics.enabled {
        crate::metrics::init_metrics()
    } else {
        None
    };
    Ok(AppState::new(Handlers::new(repository), metrics))
}

/// Start the HTTP server on the configured address
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let state = build_state(config).await?;
    let app = create_server(state);
    let addr = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server running on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
