//! Client directory API handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};

use crate::domain::Error;
use crate::domain::client::{Client, ClientDraft, ClientId};
use crate::domain::ports::ClientSearch;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, parse_email, parse_phone, parse_uuid};

/// Client fields accepted by create and update requests.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    /// Display name of the borrower.
    pub full_name: String,
    /// Contact email address.
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Query parameters for the client listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListQuery {
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

fn client_id(raw: &str) -> Result<ClientId, Error> {
    parse_uuid("id", raw).map(ClientId::from_uuid)
}

fn draft_from_payload(id: ClientId, payload: ClientPayload) -> Result<ClientDraft, Error> {
    Ok(ClientDraft {
        id,
        full_name: payload.full_name,
        email: parse_email(&payload.email)?,
        phone: parse_phone(payload.phone)?,
    })
}

/// List registered clients, optionally filtered by a search term.
#[utoipa::path(
    get,
    path = "/api/v1/clients",
    params(
        ("search" = Option<String>, Query, description = "Search term over name and email"),
        ("cursor" = Option<String>, Query, description = "Continuation cursor"),
        ("limit" = Option<usize>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of clients", body = crate::inbound::http::schemas::ClientPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["clients"],
    operation_id = "listClients"
)]
#[get("/clients")]
pub async fn list_clients(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<ClientListQuery>,
) -> ApiResult<web::Json<Page<Client>>> {
    session.require_user()?;
    let query = query.into_inner();
    let search = query
        .search
        .as_deref()
        .map_or_else(ClientSearch::all, ClientSearch::for_term);
    let page = page_request(query.cursor, query.limit)?;
    Ok(web::Json(state.clients_query.list_clients(search, page).await?))
}

/// Register a new client.
#[utoipa::path(
    post,
    path = "/api/v1/clients",
    request_body = ClientPayload,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["clients"],
    operation_id = "createClient"
)]
#[post("/clients")]
pub async fn create_client(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<ClientPayload>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let draft = draft_from_payload(ClientId::random(), payload.into_inner())?;
    let client = state.clients.add_client(draft).await?;
    Ok(HttpResponse::Created().json(client))
}

/// Fetch one client.
#[utoipa::path(
    get,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    responses(
        (status = 200, description = "The client", body = Client),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["clients"],
    operation_id = "getClient"
)]
#[get("/clients/{id}")]
pub async fn get_client(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Client>> {
    session.require_user()?;
    let id = client_id(&path)?;
    Ok(web::Json(state.clients_query.get_client(id).await?))
}

/// Replace a client's contact details.
#[utoipa::path(
    put,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    request_body = ClientPayload,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["clients"],
    operation_id = "updateClient"
)]
#[put("/clients/{id}")]
pub async fn update_client(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ClientPayload>,
) -> ApiResult<web::Json<Client>> {
    session.require_user()?;
    let id = client_id(&path)?;
    let draft = draft_from_payload(id, payload.into_inner())?;
    Ok(web::Json(state.clients.update_client(id, draft).await?))
}

/// Delete a client and their audit history.
#[utoipa::path(
    delete,
    path = "/api/v1/clients/{id}",
    params(("id" = String, Path, description = "Client identifier")),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Client still holds a loan", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["clients"],
    operation_id = "deleteClient"
)]
#[delete("/clients/{id}")]
pub async fn delete_client(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let id = client_id(&path)?;
    state.clients.remove_client(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
