//! Library-management backend: session-authenticated REST API over a book
//! catalogue, client and staff registers, and a loan activity log.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{TRACE_ID_HEADER, Trace, TraceId};
