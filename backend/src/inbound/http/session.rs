//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with domain-friendly
//! operations: persisting the authenticated profile, reading it back, and
//! enforcing login or admin-role requirements.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::auth::StaffRole;
use crate::domain::user::AuthenticatedUser;
use crate::domain::Error;

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const DISPLAY_NAME_KEY: &str = "display_name";
pub(crate) const ROLE_KEY: &str = "role";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

fn session_error(op: &str, error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to {op} session: {error}"))
}

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated profile in the session cookie.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user.id)
            .map_err(|error| session_error("persist", error))?;
        self.0
            .insert(DISPLAY_NAME_KEY, user.display_name.clone())
            .map_err(|error| session_error("persist", error))?;
        self.0
            .insert(ROLE_KEY, user.role.as_str())
            .map_err(|error| session_error("persist", error))
    }

    /// Drop every session entry, ending the login.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Fetch the current profile from the session, if present and intact.
    pub fn current_user(&self) -> Result<Option<AuthenticatedUser>, Error> {
        let id = self
            .0
            .get::<Uuid>(USER_ID_KEY)
            .map_err(|error| session_error("read", error))?;
        let display_name = self
            .0
            .get::<String>(DISPLAY_NAME_KEY)
            .map_err(|error| session_error("read", error))?;
        let role = self
            .0
            .get::<String>(ROLE_KEY)
            .map_err(|error| session_error("read", error))?;

        match (id, display_name, role) {
            (Some(id), Some(display_name), Some(raw_role)) => {
                let Some(role) = StaffRole::parse(&raw_role) else {
                    tracing::warn!(role = %raw_role, "invalid role in session cookie");
                    return Ok(None);
                };
                Ok(Some(AuthenticatedUser {
                    id,
                    display_name,
                    role,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Require an authenticated user or return `401 Unauthorized`.
    pub fn require_user(&self) -> Result<AuthenticatedUser, Error> {
        self.current_user()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Require an authenticated admin or return `401`/`403`.
    pub fn require_admin(&self) -> Result<AuthenticatedUser, Error> {
        let user = self.require_user()?;
        if user.role != StaffRole::Admin {
            return Err(Error::forbidden("administrator role required"));
        }
        Ok(user)
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
