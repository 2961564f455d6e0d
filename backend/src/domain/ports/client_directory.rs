//! Driving ports for the client register.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::client::{Client, ClientDraft, ClientId};
use crate::domain::error::Error;

/// Free-text predicate over client name and email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSearch {
    /// Case-insensitive substring; `None` matches everyone.
    pub query: Option<String>,
}

impl ClientSearch {
    /// A search matching every client.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A search for a specific term; blank input matches everyone.
    #[must_use]
    pub fn for_term(term: &str) -> Self {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            Self::all()
        } else {
            Self {
                query: Some(trimmed.to_owned()),
            }
        }
    }

    /// Whether `client` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, client: &Client) -> bool {
        self.query
            .as_deref()
            .is_none_or(|term| client.matches_search(term))
    }
}

/// Mutating client-register operations.
#[async_trait]
pub trait ClientDirectoryCommand: Send + Sync {
    /// Register a new client.
    async fn add_client(&self, draft: ClientDraft) -> Result<Client, Error>;

    /// Replace a client's details.
    async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<Client, Error>;

    /// Delete a client and their activity history.
    ///
    /// Fails with `Conflict` while the client holds a loaned book.
    async fn remove_client(&self, id: ClientId) -> Result<(), Error>;
}

/// Read-only client-register operations.
#[async_trait]
pub trait ClientDirectoryQuery: Send + Sync {
    /// Page through clients matching `search`, ordered by name.
    async fn list_clients(
        &self,
        search: ClientSearch,
        page: PageRequest,
    ) -> Result<Page<Client>, Error>;

    /// Fetch one client or `NotFound`.
    async fn get_client(&self, id: ClientId) -> Result<Client, Error>;
}
