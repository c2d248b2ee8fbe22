use super::error::ApiError;
use super::AppState;
use crate::app::commands::{
    AddEmployeeAddressCommand, CreateEmployeeCommand, DeleteEmployeeCommand,
    ReactivateEmployeeCommand, RemoveEmployeeAddressCommand, UpdateEmployeeCommand,
};
use crate::app::queries::{GetEmployeeByIdQuery, GetEmployeeListQuery};
use crate::app::{CommandHandler, QueryHandler};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

type ApiResult = Result<Response, ApiError>;

/// Nil means the body left the id out.
fn check_route_id(route_id: Uuid, body_id: Uuid) -> Result<(), ApiError> {
    if !body_id.is_nil() && body_id != route_id {
        return Err(ApiError::IdMismatch);
    }
    Ok(())
}

pub async fn list_employees(
    State(state): State<AppState>,
    query: Result<Query<GetEmployeeListQuery>, QueryRejection>,
) -> ApiResult {
    let Query(query) = query?;
    let list = state.handlers.list_employees.handle(query).await?;
    Ok(Json(list).into_response())
}

pub async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult {
    let Path(id) = id?;
    let employee = state
        .handlers
        .get_employee
        .handle(GetEmployeeByIdQuery { id })
        .await?;
    Ok(Json(employee).into_response())
}

pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeCommand>, JsonRejection>,
) -> ApiResult {
    let Json(command) = payload?;
    let employee = state.handlers.create_employee.handle(command).await?;
    let location = format!("/api/employees/{}", employee.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(employee),
    )
        .into_response())
}

pub async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateEmployeeCommand>, JsonRejection>,
) -> ApiResult {
    let Path(id) = id?;
    let Json(mut command) = payload?;
    check_route_id(id, command.id)?;
    command.id = id;

    state.handlers.update_employee.handle(command).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult {
    let Path(id) = id?;
    state
        .handlers
        .delete_employee
        .handle(DeleteEmployeeCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn reactivate_employee(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult {
    let Path(id) = id?;
    state
        .handlers
        .reactivate_employee
        .handle(ReactivateEmployeeCommand { id })
        .await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn add_address(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AddEmployeeAddressCommand>, JsonRejection>,
) -> ApiResult {
    let Path(id) = id?;
    let Json(mut command) = payload?;
    check_route_id(id, command.employee_id)?;
    command.employee_id = id;

    state.handlers.add_address.handle(command).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn remove_address(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RemoveEmployeeAddressCommand>, JsonRejection>,
) -> ApiResult {
    let Path(id) = id?;
    let Json(mut command) = payload?;
    check_route_id(id, command.employee_id)?;
    command.employee_id = id;

    state.handlers.remove_address.handle(command).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
