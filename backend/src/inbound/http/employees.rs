//! Staff register API handlers.
//!
//! Every route here is gated to administrators; ordinary staff members
//! can manage books and clients but not the staff register itself.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::domain::ports::EmployeeSearch;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, parse_email, parse_role, parse_uuid};

/// Employee fields accepted by create and update requests.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    /// Display name of the staff member.
    pub full_name: String,
    /// Work email address.
    pub email: String,
    /// Staff role label, `admin` or `staff`.
    pub role: String,
}

/// Query parameters for the employee listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    /// Case-insensitive substring over name and email.
    #[serde(default)]
    pub search: Option<String>,
    /// Continuation cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Page size; clamped server side.
    #[serde(default)]
    pub limit: Option<usize>,
}

fn employee_id(raw: &str) -> Result<EmployeeId, Error> {
    parse_uuid("id", raw).map(EmployeeId::from_uuid)
}

fn draft_from_payload(id: EmployeeId, payload: EmployeePayload) -> Result<EmployeeDraft, Error> {
    Ok(EmployeeDraft {
        id,
        full_name: payload.full_name,
        email: parse_email(&payload.email)?,
        role: parse_role(&payload.role)?,
    })
}

/// List staff members, optionally filtered by a search term.
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(
        ("search" = Option<String>, Query, description = "Search term over name and email"),
        ("cursor" = Option<String>, Query, description = "Continuation cursor"),
        ("limit" = Option<usize>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of employees", body = crate::inbound::http::schemas::EmployeePage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employees")]
pub async fn list_employees(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<EmployeeListQuery>,
) -> ApiResult<web::Json<Page<Employee>>> {
    session.require_admin()?;
    let query = query.into_inner();
    let search = query
        .search
        .as_deref()
        .map_or_else(EmployeeSearch::all, EmployeeSearch::for_term);
    let page = page_request(query.cursor, query.limit)?;
    Ok(web::Json(
        state.employees_query.list_employees(search, page).await?,
    ))
}

/// Register a new staff member.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = EmployeePayload,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employees")]
pub async fn create_employee(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<EmployeePayload>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let draft = draft_from_payload(EmployeeId::random(), payload.into_inner())?;
    let employee = state.employees.add_employee(draft).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// Fetch one staff member.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, description = "The employee", body = Employee),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/employees/{id}")]
pub async fn get_employee(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Employee>> {
    session.require_admin()?;
    let id = employee_id(&path)?;
    Ok(web::Json(state.employees_query.get_employee(id).await?))
}

/// Replace a staff member's details, including their role.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employees/{id}")]
pub async fn update_employee(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EmployeePayload>,
) -> ApiResult<web::Json<Employee>> {
    session.require_admin()?;
    let id = employee_id(&path)?;
    let draft = draft_from_payload(id, payload.into_inner())?;
    Ok(web::Json(state.employees.update_employee(id, draft).await?))
}

/// Delete a staff member.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Administrator role required", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employees/{id}")]
pub async fn delete_employee(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let id = employee_id(&path)?;
    state.employees.remove_employee(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
