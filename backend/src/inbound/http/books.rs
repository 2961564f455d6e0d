//! Book catalogue and circulation API handlers.
//!
//! ```text
//! GET    /api/v1/books?q=&cursor=&limit=
//! POST   /api/v1/books
//! GET    /api/v1/books/{id}
//! PUT    /api/v1/books/{id}
//! DELETE /api/v1/books/{id}
//! POST   /api/v1/books/{id}/loan {"clientId":"..."}
//! POST   /api/v1/books/{id}/return
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::book::{Book, BookDraft, BookId, BookUpdate, LoanStatus};
use crate::domain::client::ClientId;
use crate::domain::loan::LoanActivity;
use crate::domain::ports::BookSearch;
use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{page_request, parse_isbn, parse_uuid};

/// Book fields accepted by create and update requests.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Title shown in the catalogue.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Optional ISBN-10 or ISBN-13.
    #[serde(default)]
    pub isbn: Option<String>,
    /// Shelf category label.
    pub category: String,
    /// Optional publication year.
    #[serde(default)]
    pub publication_year: Option<i32>,
}

/// Query parameters for the book listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookListQuery {
    /// Case-insensitive substring over title, author, and category.
    #[serde(default)]
    pub search: Option<String>,
    /// Continuation cursor from a previous page.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Page size; clamped server side.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Loan request body naming the borrowing client.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Identifier of the borrowing client.
    #[schema(value_type = String)]
    pub client_id: Uuid,
}

fn book_id(raw: &str) -> Result<BookId, Error> {
    parse_uuid("id", raw).map(BookId::from_uuid)
}

/// List catalogue books, optionally filtered by a search term.
#[utoipa::path(
    get,
    path = "/api/v1/books",
    params(
        ("search" = Option<String>, Query, description = "Search term over title, author, and category"),
        ("cursor" = Option<String>, Query, description = "Continuation cursor"),
        ("limit" = Option<usize>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of books", body = crate::inbound::http::schemas::BookPage),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<BookListQuery>,
) -> ApiResult<web::Json<Page<Book>>> {
    session.require_user()?;
    let query = query.into_inner();
    let search = query
        .search
        .as_deref()
        .map_or_else(BookSearch::all, BookSearch::for_term);
    let page = page_request(query.cursor, query.limit)?;
    Ok(web::Json(state.catalogue_query.list_books(search, page).await?))
}

/// Register a new book; it starts available.
#[utoipa::path(
    post,
    path = "/api/v1/books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<BookPayload>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let payload = payload.into_inner();
    let draft = BookDraft {
        id: BookId::random(),
        title: payload.title,
        author: payload.author,
        isbn: parse_isbn(payload.isbn)?,
        category: payload.category,
        publication_year: payload.publication_year,
        status: LoanStatus::Available,
    };
    let book = state.catalogue.add_book(draft).await?;
    Ok(HttpResponse::Created().json(book))
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Book>> {
    session.require_user()?;
    let id = book_id(&path)?;
    Ok(web::Json(state.catalogue_query.get_book(id).await?))
}

/// Replace a book's bibliographic fields, preserving its loan status.
#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BookPayload>,
) -> ApiResult<web::Json<Book>> {
    session.require_user()?;
    let id = book_id(&path)?;
    let payload = payload.into_inner();
    let update = BookUpdate {
        title: payload.title,
        author: payload.author,
        isbn: parse_isbn(payload.isbn)?,
        category: payload.category,
        publication_year: payload.publication_year,
    };
    Ok(web::Json(state.catalogue.update_book(id, update).await?))
}

/// Delete a book and its audit history.
#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Book is on loan", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let id = book_id(&path)?;
    state.catalogue.remove_book(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Loan a book to a client, appending an audit record.
#[utoipa::path(
    post,
    path = "/api/v1/books/{id}/loan",
    params(("id" = String, Path, description = "Book identifier")),
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan recorded", body = LoanActivity),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Book or client not found", body = Error),
        (status = 409, description = "Book is already on loan", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["circulation"],
    operation_id = "loanBook"
)]
#[post("/books/{id}/loan")]
pub async fn loan_book(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<LoanRequest>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let id = book_id(&path)?;
    let client_id = ClientId::from_uuid(payload.client_id);
    let activity = state.circulation.loan_book(id, client_id).await?;
    Ok(HttpResponse::Created().json(activity))
}

/// Return a loaned book, appending an audit record.
#[utoipa::path(
    post,
    path = "/api/v1/books/{id}/return",
    params(("id" = String, Path, description = "Book identifier")),
    responses(
        (status = 201, description = "Return recorded", body = LoanActivity),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Book not found", body = Error),
        (status = 409, description = "Book is not on loan", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["circulation"],
    operation_id = "returnBook"
)]
#[post("/books/{id}/return")]
pub async fn return_book(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_user()?;
    let id = book_id(&path)?;
    let activity = state.circulation.return_book(id).await?;
    Ok(HttpResponse::Created().json(activity))
}
