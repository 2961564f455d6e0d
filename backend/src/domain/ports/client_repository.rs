//! Port abstraction for client persistence adapters.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::client::{Client, ClientId};

/// Driven port over the `clients` collection.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// List every client, name order.
    async fn list(&self) -> Result<Vec<Client>, RepositoryError>;

    /// Fetch a client by identifier.
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError>;

    /// Insert or update a client record.
    async fn save(&self, client: &Client) -> Result<(), RepositoryError>;

    /// Delete a client; returns whether a record existed.
    async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError>;
}
