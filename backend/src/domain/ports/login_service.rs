//! Driving port for password authentication.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::user::AuthenticatedUser;

/// Authenticates staff against stored credentials.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and return the session-facing profile.
    ///
    /// Unknown usernames and wrong passwords map to the same
    /// `Unauthorized` error so callers cannot enumerate accounts.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error>;
}
