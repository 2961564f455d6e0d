//! Test helpers for the session-authenticated handler tests.

use actix_session::config::CookieContentSecurity;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

/// Session middleware mirroring the server's librarian cookie contract.
///
/// Keeps the `session` cookie name, root path, `HttpOnly` flag, and private
/// content security the server builds, with a throwaway key per invocation
/// and the `Secure` flag dropped so plain-HTTP test requests can carry the
/// cookie back.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}
