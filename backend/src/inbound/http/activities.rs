//! Loan activity log API handler.

use actix_web::{get, web};
use pagination::{Page, paginate};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::book::BookId;
use crate::domain::client::ClientId;
use crate::domain::loan::LoanActivity;
use crate::domain::ports::ActivityFilter;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::page_request;

/// Query parameters narrowing and paging the activity log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityQuery {
    /// Restrict to one book's history.
    #[serde(default)]
    pub book_id: Option<Uuid>,
    /// Restrict to one client's history.
    #[serde(default)]
    pub client_id: Option<Uuid>,
    /// Continuation cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Page size; clamped server side.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// List loan activity records, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    params(
        ("bookId" = Option<String>, Query, description = "Restrict to one book"),
        ("clientId" = Option<String>, Query, description = "Restrict to one client"),
        ("cursor" = Option<String>, Query, description = "Continuation cursor"),
        ("limit" = Option<usize>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of activity records, newest first", body = crate::inbound::http::schemas::ActivityPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["circulation"],
    operation_id = "listActivities"
)]
#[get("/activities")]
pub async fn list_activities(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<ActivityQuery>,
) -> ApiResult<web::Json<Page<LoanActivity>>> {
    session.require_user()?;
    let query = query.into_inner();
    let filter = ActivityFilter {
        book_id: query.book_id.map(BookId::from_uuid),
        client_id: query.client_id.map(ClientId::from_uuid),
    };
    let page = page_request(query.cursor, query.limit)?;
    let entries = state.circulation_query.list_activities(filter).await?;
    paginate(entries, &page)
        .map(web::Json)
        .map_err(|_| Error::invalid_request("cursor offset out of range"))
}
