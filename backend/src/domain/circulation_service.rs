//! Circulation domain service.
//!
//! Owns the loan/return state machine: flips a book's status, then appends
//! the denormalised audit record. The two writes are sequential; the status
//! flip is the authoritative one and the log trails it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::book::{Book, BookId, LoanStateError};
use crate::domain::client::{Client, ClientId};
use crate::domain::error::Error;
use crate::domain::loan::{LoanAction, LoanActivity};
use crate::domain::ports::{
    ActivityFilter, BookRepository, CirculationCommand, CirculationQuery, ClientRepository,
    LoanActivityRepository,
};

/// Circulation service implementing the driving ports.
#[derive(Clone)]
pub struct CirculationService<B, C, A> {
    books: Arc<B>,
    clients: Arc<C>,
    activities: Arc<A>,
}

impl<B, C, A> CirculationService<B, C, A> {
    /// Create a new service over the given repositories.
    pub fn new(books: Arc<B>, clients: Arc<C>, activities: Arc<A>) -> Self {
        Self {
            books,
            clients,
            activities,
        }
    }
}

fn loan_state_error(error: LoanStateError) -> Error {
    match error {
        LoanStateError::AlreadyLoaned => Error::conflict("book is already on loan"),
        LoanStateError::NotLoaned => Error::conflict("book is not currently on loan"),
    }
}

impl<B, C, A> CirculationService<B, C, A>
where
    B: BookRepository,
    C: ClientRepository,
    A: LoanActivityRepository,
{
    async fn require_book(&self, id: BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("book repository"))?
            .ok_or_else(|| Error::not_found("book not found"))
    }

    async fn require_client(&self, id: ClientId) -> Result<Client, Error> {
        self.clients
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("client repository"))?
            .ok_or_else(|| Error::not_found("client not found"))
    }

    async fn log_activity(
        &self,
        book: &Book,
        client: &Client,
        action: LoanAction,
    ) -> Result<LoanActivity, Error> {
        let activity = LoanActivity::record(book, client, action);
        self.activities
            .append(&activity)
            .await
            .map_err(|err| err.into_domain("activity repository"))?;
        Ok(activity)
    }
}

#[async_trait]
impl<B, C, A> CirculationCommand for CirculationService<B, C, A>
where
    B: BookRepository,
    C: ClientRepository,
    A: LoanActivityRepository,
{
    async fn loan_book(
        &self,
        book_id: BookId,
        client_id: ClientId,
    ) -> Result<LoanActivity, Error> {
        let mut book = self.require_book(book_id).await?;
        let client = self.require_client(client_id).await?;
        book.loan_to(*client.id().as_uuid()).map_err(loan_state_error)?;
        self.books
            .save(&book)
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        self.log_activity(&book, &client, LoanAction::Loaned).await
    }

    async fn return_book(&self, book_id: BookId) -> Result<LoanActivity, Error> {
        let mut book = self.require_book(book_id).await?;
        let borrower = book.mark_returned().map_err(loan_state_error)?;
        // A borrower cannot be deleted while holding a loan, so a missing
        // record here is a store inconsistency rather than caller error.
        let client = self
            .clients
            .find_by_id(ClientId::from_uuid(borrower))
            .await
            .map_err(|err| err.into_domain("client repository"))?
            .ok_or_else(|| Error::internal("borrower record missing for loaned book"))?;
        self.books
            .save(&book)
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        self.log_activity(&book, &client, LoanAction::Returned)
            .await
    }
}

#[async_trait]
impl<B, C, A> CirculationQuery for CirculationService<B, C, A>
where
    B: BookRepository,
    C: ClientRepository,
    A: LoanActivityRepository,
{
    async fn list_activities(
        &self,
        filter: ActivityFilter,
    ) -> Result<Vec<LoanActivity>, Error> {
        self.activities
            .list(filter)
            .await
            .map_err(|err| err.into_domain("activity repository"))
    }
}
