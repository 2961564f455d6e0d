//! Client register domain service.
//!
//! Implements the client command and query ports, blocking deletion while
//! the client still holds a loaned book and cascading the removal of their
//! audit records otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest, paginate};
use serde_json::json;

use crate::domain::client::{Client, ClientDraft, ClientId, ClientValidationError};
use crate::domain::error::Error;
use crate::domain::ports::{
    BookRepository, ClientDirectoryCommand, ClientDirectoryQuery, ClientRepository, ClientSearch,
    LoanActivityRepository,
};

/// Client register service implementing the driving ports.
#[derive(Clone)]
pub struct ClientDirectoryService<C, B, A> {
    clients: Arc<C>,
    books: Arc<B>,
    activities: Arc<A>,
}

impl<C, B, A> ClientDirectoryService<C, B, A> {
    /// Create a new service over the given repositories.
    pub fn new(clients: Arc<C>, books: Arc<B>, activities: Arc<A>) -> Self {
        Self {
            clients,
            books,
            activities,
        }
    }
}

fn validation_error(error: &ClientValidationError) -> Error {
    Error::invalid_request("invalid client payload").with_details(json!({
        "reason": error.to_string(),
    }))
}

impl<C, B, A> ClientDirectoryService<C, B, A>
where
    C: ClientRepository,
    B: BookRepository,
    A: LoanActivityRepository,
{
    async fn require_client(&self, id: ClientId) -> Result<Client, Error> {
        self.clients
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("client repository"))?
            .ok_or_else(|| Error::not_found("client not found"))
    }

    async fn holds_loan(&self, id: ClientId) -> Result<bool, Error> {
        let books = self
            .books
            .list()
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        Ok(books
            .iter()
            .any(|book| book.status().borrower() == Some(*id.as_uuid())))
    }
}

#[async_trait]
impl<C, B, A> ClientDirectoryCommand for ClientDirectoryService<C, B, A>
where
    C: ClientRepository,
    B: BookRepository,
    A: LoanActivityRepository,
{
    async fn add_client(&self, draft: ClientDraft) -> Result<Client, Error> {
        let client = Client::new(draft).map_err(|err| validation_error(&err))?;
        self.clients
            .save(&client)
            .await
            .map_err(|err| err.into_domain("client repository"))?;
        Ok(client)
    }

    async fn update_client(&self, id: ClientId, draft: ClientDraft) -> Result<Client, Error> {
        self.require_client(id).await?;
        let client = Client::new(ClientDraft { id, ..draft })
            .map_err(|err| validation_error(&err))?;
        self.clients
            .save(&client)
            .await
            .map_err(|err| err.into_domain("client repository"))?;
        Ok(client)
    }

    async fn remove_client(&self, id: ClientId) -> Result<(), Error> {
        self.require_client(id).await?;
        if self.holds_loan(id).await? {
            return Err(Error::conflict("client still holds a loaned book"));
        }
        let removed = self
            .clients
            .delete(id)
            .await
            .map_err(|err| err.into_domain("client repository"))?;
        if !removed {
            return Err(Error::not_found("client not found"));
        }
        self.activities
            .delete_for_client(id)
            .await
            .map_err(|err| err.into_domain("activity repository"))?;
        Ok(())
    }
}

#[async_trait]
impl<C, B, A> ClientDirectoryQuery for ClientDirectoryService<C, B, A>
where
    C: ClientRepository,
    B: BookRepository,
    A: LoanActivityRepository,
{
    async fn list_clients(
        &self,
        search: ClientSearch,
        page: PageRequest,
    ) -> Result<Page<Client>, Error> {
        let mut clients = self
            .clients
            .list()
            .await
            .map_err(|err| err.into_domain("client repository"))?;
        clients.retain(|client| search.matches(client));
        clients.sort_by(|a, b| {
            a.full_name()
                .to_lowercase()
                .cmp(&b.full_name().to_lowercase())
        });
        paginate(clients, &page)
            .map_err(|_| Error::invalid_request("cursor offset out of range"))
    }

    async fn get_client(&self, id: ClientId) -> Result<Client, Error> {
        self.require_client(id).await
    }
}
