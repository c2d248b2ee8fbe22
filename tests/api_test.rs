use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use employee_api::api::AppState;
use employee_api::app::Handlers;
use employee_api::server::create_server;
use employee_core::storage::{DatabaseStorage, EmployeeRepository, InMemoryStorage};
use employee_core::DatabaseManager;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(repository: Arc<dyn EmployeeRepository>) -> Router {
    create_server(AppState::new(Handlers::new(repository), None))
}

fn app() -> Router {
    app_with(Arc::new(InMemoryStorage::new()))
}

fn employee_body(email: &str, document: &str) -> Value {
    json!({
        "firstName": "Maria",
        "lastName": "Silva",
        "email": email,
        "birthDate": "1990-05-17",
        "document": document,
        "position": "Engineer",
        "salary": 8500.00
    })
}

fn address_body(street: &str, is_main: bool) -> Value {
    json!({
        "street": street,
        "number": "100",
        "neighborhood": "Centro",
        "city": "São Paulo",
        "state": "SP",
        "zipCode": "01001-000",
        "isMain": is_main
    })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

fn codes(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e["code"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

async fn create(app: &Router, email: &str, document: &str) -> Result<String> {
    let (status, body) = send(app, "POST", "/api/employees", Some(employee_body(email, document))).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["id"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn health_reports_healthy() -> Result<()> {
    let (status, body) = send(&app(), "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn metrics_endpoint_is_hidden_when_disabled() -> Result<()> {
    let response = app()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn metrics_endpoint_renders_counters_when_enabled() -> Result<()> {
    let handle = employee_api::metrics::init_metrics();
    assert!(handle.is_some());
    let app = create_server(AppState::new(
        Handlers::new(Arc::new(InMemoryStorage::new())),
        handle,
    ));
    create(&app, "maria@example.com", "52998224725").await?;

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(response.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("employees_created_total"));
    Ok(())
}

#[tokio::test]
async fn create_returns_location_and_employee() -> Result<()> {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/employees")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&employee_body(
            "maria@example.com",
            "529.982.247-25",
        ))?))?;

    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;

    assert_eq!(location, format!("/api/employees/{}", body["id"].as_str().unwrap_or_default()));
    assert_eq!(body["fullName"], "Maria Silva");
    assert_eq!(body["document"], "52998224725");
    assert_eq!(body["documentType"], "CPF");
    assert_eq!(body["salary"], 8500.0);
    assert_eq!(body["currency"], "BRL");
    assert_eq!(body["isActive"], true);
    assert_eq!(body["birthDate"], "1990-05-17");

    let (status, fetched) = send(&app, "GET", &location, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "maria@example.com");
    Ok(())
}

#[tokio::test]
async fn invalid_create_lists_every_failure() -> Result<()> {
    let mut body = employee_body("nope", "123");
    body["salary"] = json!(-1);
    let (status, body) = send(&app(), "POST", "/api/employees", Some(body)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let codes = codes(&body);
    assert!(codes.contains(&"Email.InvalidFormat".to_string()));
    assert!(codes.contains(&"Document.InvalidFormat".to_string()));
    assert!(codes.contains(&"Employee.SalaryNotPositive".to_string()));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/employees")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstName\": "))?;
    let response = app().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(codes(&body), vec!["Request.Malformed"]);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() -> Result<()> {
    let app = app();
    create(&app, "maria@example.com", "52998224725").await?;

    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(employee_body("Maria@Example.com", "11144477735")),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(codes(&body), vec!["Employee.EmailInUse"]);
    Ok(())
}

#[tokio::test]
async fn unknown_or_unparsable_ids() -> Result<()> {
    let app = app();
    let (status, body) = send(
        &app,
        "GET",
        "/api/employees/9b2f6a3e-6f1e-4a43-9d2a-1c8f0e6b7a55",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(codes(&body), vec!["Employee.NotFound"]);

    let (status, body) = send(&app, "GET", "/api/employees/not-a-uuid", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(codes(&body), vec!["Request.Malformed"]);
    Ok(())
}

#[tokio::test]
async fn update_rejects_mismatched_body_id() -> Result<()> {
    let app = app();
    let id = create(&app, "maria@example.com", "52998224725").await?;

    let mut body = employee_body("maria@example.com", "52998224725");
    body["id"] = json!("9b2f6a3e-6f1e-4a43-9d2a-1c8f0e6b7a55");
    let (status, body) = send(&app, "PUT", &format!("/api/employees/{id}"), Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(codes(&body), vec!["Request.IdMismatch"]);
    Ok(())
}

#[tokio::test]
async fn address_routes_reject_mismatched_body_id() -> Result<()> {
    let app = app();
    let id = create(&app, "maria@example.com", "52998224725").await?;
    let uri = format!("/api/employees/{id}/addresses");

    for method in ["POST", "DELETE"] {
        let mut body = address_body("Rua Augusta", true);
        body["employeeId"] = json!("9b2f6a3e-6f1e-4a43-9d2a-1c8f0e6b7a55");
        let (status, body) = send(&app, method, &uri, Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert_eq!(codes(&body), vec!["Request.IdMismatch"]);
    }

    // A null id is the same as leaving it out
    let mut body = address_body("Rua Augusta", true);
    body["employeeId"] = Value::Null;
    let (status, _) = send(&app, "POST", &uri, Some(body)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn update_then_read_back() -> Result<()> {
    let app = app();
    let id = create(&app, "maria@example.com", "52998224725").await?;

    let mut body = employee_body("maria.souza@example.com", "52998224725");
    body["id"] = json!(id);
    body["lastName"] = json!("Souza");
    body["salary"] = json!("9100.456");
    let (status, _) = send(&app, "PUT", &format!("/api/employees/{id}"), Some(body)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = send(&app, "GET", &format!("/api/employees/{id}"), None).await?;
    assert_eq!(fetched["fullName"], "Maria Souza");
    assert_eq!(fetched["email"], "maria.souza@example.com");
    assert_eq!(fetched["salary"], 9100.46);
    Ok(())
}

#[tokio::test]
async fn delete_and_reactivate() -> Result<()> {
    let app = app();
    let id = create(&app, "maria@example.com", "52998224725").await?;
    let uri = format!("/api/employees/{id}");

    let (status, _) = send(&app, "DELETE", &uri, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = send(&app, "GET", &uri, None).await?;
    assert_eq!(fetched["isActive"], false);

    // Soft-deleted employees still show up in the list
    let (_, list) = send(&app, "GET", "/api/employees", None).await?;
    assert_eq!(list["totalCount"], 1);

    let (status, _) = send(&app, "POST", &format!("{uri}/activate"), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = send(&app, "GET", &uri, None).await?;
    assert_eq!(fetched["isActive"], true);

    let (status, _) = send(
        &app,
        "DELETE",
        "/api/employees/9b2f6a3e-6f1e-4a43-9d2a-1c8f0e6b7a55",
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn address_lifecycle() -> Result<()> {
    let app = app();
    let id = create(&app, "maria@example.com", "52998224725").await?;
    let addresses = format!("/api/employees/{id}/addresses");

    let (status, _) = send(&app, "POST", &addresses, Some(address_body("Rua A", false))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "POST", &addresses, Some(address_body("Rua B", true))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "POST", &addresses, Some(address_body("Rua B", false))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(codes(&body), vec!["Address.Duplicate"]);

    let (_, fetched) = send(&app, "GET", &format!("/api/employees/{id}"), None).await?;
    let stored = fetched["addresses"].as_array().cloned().unwrap_or_default();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0]["isMain"], false);
    assert_eq!(stored[1]["isMain"], true);
    assert_eq!(stored[1]["country"], "Brasil");

    let (status, _) = send(&app, "DELETE", &addresses, Some(address_body("Rua B", false))).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, fetched) = send(&app, "GET", &format!("/api/employees/{id}"), None).await?;
    assert_eq!(fetched["addresses"][0]["street"], "Rua A");
    assert_eq!(fetched["addresses"][0]["isMain"], true);

    let (status, body) = send(&app, "DELETE", &addresses, Some(address_body("Rua Z", false))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(codes(&body), vec!["Address.NotFound"]);
    Ok(())
}

#[tokio::test]
async fn list_paging_is_normalized() -> Result<()> {
    let app = app();
    create(&app, "a@example.com", "52998224725").await?;
    create(&app, "b@example.com", "11144477735").await?;
    create(&app, "c@example.com", "12345678000195").await?;

    let (status, list) = send(&app, "GET", "/api/employees?page=0&pageSize=2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["page"], 1);
    assert_eq!(list["pageSize"], 2);
    assert_eq!(list["totalCount"], 3);
    assert_eq!(list["totalPages"], 2);
    assert_eq!(list["employees"].as_array().map(Vec::len), Some(2));

    let (_, list) = send(&app, "GET", "/api/employees?pageSize=1000", None).await?;
    assert_eq!(list["pageSize"], 100);

    let (status, body) = send(&app, "GET", "/api/employees?page=abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(codes(&body), vec!["Request.Malformed"]);
    Ok(())
}

#[tokio::test]
async fn sqlite_backend_serves_the_same_api() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db = DatabaseManager::open(dir.path().join("employees.db"))?;
    db.run_migrations().await?;
    let app = app_with(Arc::new(DatabaseStorage::new(db)));

    let id = create(&app, "maria@example.com", "52998224725").await?;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/employees/{id}/addresses"),
        Some(address_body("Rua A", false)),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, fetched) = send(&app, "GET", &format!("/api/employees/{id}"), None).await?;
    assert_eq!(fetched["addresses"][0]["isMain"], true);

    let (status, body) = send(
        &app,
        "POST",
        "/api/employees",
        Some(employee_body("joao@example.com", "529.982.247-25")),
    )
    .await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(codes(&body), vec!["Employee.DocumentInUse"]);
    Ok(())
}
