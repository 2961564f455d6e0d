//! OpenAPI schemas for paged list responses.
//!
//! `pagination::Page` is generic, so each listing endpoint registers a
//! concrete doc-only wrapper here instead.

use utoipa::ToSchema;

use crate::domain::book::Book;
use crate::domain::client::Client;
use crate::domain::employee::Employee;
use crate::domain::loan::LoanActivity;

/// One page of catalogue books.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BookPage {
    /// Books on this page, ordered by title.
    items: Vec<Book>,
    /// Continuation token; absent on the final page.
    next_cursor: Option<String>,
}

/// One page of registered clients.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ClientPage {
    /// Clients on this page, ordered by name.
    items: Vec<Client>,
    /// Continuation token; absent on the final page.
    next_cursor: Option<String>,
}

/// One page of staff members.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmployeePage {
    /// Employees on this page, ordered by name.
    items: Vec<Employee>,
    /// Continuation token; absent on the final page.
    next_cursor: Option<String>,
}

/// One page of loan activity records.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ActivityPage {
    /// Activity records on this page, newest first.
    items: Vec<LoanActivity>,
    /// Continuation token; absent on the final page.
    next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn page_schemas_use_camel_case_cursor_field() {
        for schema_json in [
            schema_to_json::<BookPage>(),
            schema_to_json::<ClientPage>(),
            schema_to_json::<EmployeePage>(),
            schema_to_json::<ActivityPage>(),
        ] {
            assert!(
                schema_json.contains("nextCursor"),
                "schema should expose nextCursor"
            );
            assert!(schema_json.contains("items"), "schema should expose items");
        }
    }
}
