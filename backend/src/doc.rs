//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] gathers every REST endpoint, the shared schemas, and the
//! session cookie security scheme into one document. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` exports it for tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::schemas::{ActivityPage, BookPage, ClientPage, EmployeePage};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Library backend API",
        description = "HTTP interface for catalogue, circulation, and register management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::me,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::books::loan_book,
        crate::inbound::http::books::return_book,
        crate::inbound::http::clients::list_clients,
        crate::inbound::http::clients::create_client,
        crate::inbound::http::clients::get_client,
        crate::inbound::http::clients::update_client,
        crate::inbound::http::clients::delete_client,
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::get_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::activities::list_activities,
        crate::inbound::http::dashboard::summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ActivityPage, BookPage, ClientPage, EmployeePage)),
    tags(
        (name = "auth", description = "Login, logout, and the current session"),
        (name = "books", description = "Catalogue management"),
        (name = "circulation", description = "Loans, returns, and the activity log"),
        (name = "clients", description = "Borrower register"),
        (name = "employees", description = "Staff register (administrators only)"),
        (name = "dashboard", description = "Aggregated collection summary"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
