//! Password authentication service.
//!
//! Verifies submitted credentials against the stored salted digests. Every
//! failure path other than a disabled account collapses to the same
//! `Unauthorized` message so responses never reveal which usernames exist.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::auth::{CredentialFailure, LoginCredentials};
use crate::domain::error::Error;
use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::user::{AuthenticatedUser, Username};

/// Login service implementing the driving port.
#[derive(Clone)]
pub struct PasswordLoginService<U: ?Sized> {
    users: Arc<U>,
}

impl<U: ?Sized> PasswordLoginService<U> {
    /// Create a new service over the given credential store.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn rejection(failure: CredentialFailure) -> Error {
    debug!(failure = ?failure, "login rejected");
    Error::unauthorized(failure.user_message())
}

#[async_trait]
impl<U> LoginService for PasswordLoginService<U>
where
    U: UserRepository + ?Sized,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        // A malformed username cannot match any account; report it the same
        // way as an unknown one.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(rejection(CredentialFailure::UnknownUser));
        };
        let Some(record) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(|err| err.into_domain("user repository"))?
        else {
            return Err(rejection(CredentialFailure::UnknownUser));
        };
        if !record.digest().verify(credentials.password()) {
            return Err(rejection(CredentialFailure::WrongPassword));
        }
        if !record.is_active() {
            return Err(rejection(CredentialFailure::Disabled));
        }
        Ok(AuthenticatedUser::from(&record))
    }
}
