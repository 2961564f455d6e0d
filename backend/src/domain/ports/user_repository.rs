//! Port abstraction for staff-credential persistence adapters.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::user::{UserRecord, Username};

/// Driven port over stored staff credentials.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Look a user up by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, RepositoryError>;

    /// Insert or replace a user keyed by username.
    async fn upsert(&self, user: &UserRecord) -> Result<(), RepositoryError>;
}
