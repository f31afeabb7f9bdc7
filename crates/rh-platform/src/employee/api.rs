//! Employee API
//!
//! REST endpoints under `/Funcionario`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::audit::entity::{AuditAction, AuditLogEntry};
use crate::employee::entity::{admission_date, Employee, EmployeeData};
use crate::employee::service::EmployeeService;
use crate::shared::error::{ErrorResponse, RhError};

/// Audit entry as returned by the log endpoint
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntryResponse {
    pub partition_key: String,
    pub row_key: String,
    pub action: AuditAction,
    pub employee_id: i32,
    pub name: String,
    pub address: String,
    pub salary: Decimal,
    pub department: String,
    pub admission_date: String,
    /// RFC 3339, UTC
    pub timestamp: String,
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            admission_date: admission_date::format(&entry.admission_date),
            timestamp: entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            partition_key: entry.partition_key,
            row_key: entry.row_key,
            action: entry.action,
            employee_id: entry.employee_id,
            name: entry.name,
            address: entry.address,
            salary: entry.salary,
            department: entry.department,
        }
    }
}

#[derive(Clone)]
pub struct EmployeesState {
    pub service: Arc<EmployeeService>,
}

/// List all employees
#[utoipa::path(
    get,
    path = "/ListarTodos",
    tag = "employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 404, description = "No employees recorded", body = ErrorResponse)
    )
)]
pub async fn list_employees(
    State(state): State<EmployeesState>,
) -> Result<Json<Vec<Employee>>, RhError> {
    Ok(Json(state.service.list_all().await?))
}

/// Get employee by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i32>,
) -> Result<Json<Employee>, RhError> {
    Ok(Json(state.service.get_by_id(id).await?))
}

/// Get the audit log of an employee
#[utoipa::path(
    get,
    path = "/{id}/Log",
    tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Audit entries", body = Vec<AuditLogEntryResponse>),
        (status = 404, description = "Employee or log not found", body = ErrorResponse)
    )
)]
pub async fn get_employee_log(
    State(state): State<EmployeesState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<AuditLogEntryResponse>>, RhError> {
    let entries = state.service.get_audit_log(id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "",
    tag = "employees",
    request_body = EmployeeData,
    responses(
        (status = 201, description = "Employee created", body = Employee,
            headers(("Location" = String, description = "URL of the new employee"))),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<EmployeesState>,
    Json(data): Json<EmployeeData>,
) -> Result<Response, RhError> {
    let employee = state.service.create(data).await?;
    let location = format!("/Funcionario/{}", employee.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(employee),
    )
        .into_response())
}

/// Replace an employee
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    request_body = EmployeeData,
    responses(
        (status = 200, description = "Employee updated"),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i32>,
    Json(data): Json<EmployeeData>,
) -> Result<StatusCode, RhError> {
    state.service.update(id, data).await?;
    Ok(StatusCode::OK)
}

/// Delete an employee
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "employees",
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, RhError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn employees_router(state: EmployeesState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_employees))
        .routes(routes!(create_employee))
        .routes(routes!(get_employee, update_employee, delete_employee))
        .routes(routes!(get_employee_log))
        .with_state(state)
}
