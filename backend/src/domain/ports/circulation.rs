//! Driving ports for the loan and return workflow.

use async_trait::async_trait;

use super::ActivityFilter;
use crate::domain::book::BookId;
use crate::domain::client::ClientId;
use crate::domain::error::Error;
use crate::domain::loan::LoanActivity;

/// State transitions on a book's circulation status.
#[async_trait]
pub trait CirculationCommand: Send + Sync {
    /// Loan `book_id` to `client_id`, recording an audit entry.
    ///
    /// Fails with `Conflict` when the book is already loaned, and
    /// `NotFound` when either party is unknown.
    async fn loan_book(
        &self,
        book_id: BookId,
        client_id: ClientId,
    ) -> Result<LoanActivity, Error>;

    /// Return a loaned book, recording an audit entry.
    ///
    /// Fails with `Conflict` when the book is not currently loaned.
    async fn return_book(&self, book_id: BookId) -> Result<LoanActivity, Error>;
}

/// Read access to the circulation audit log.
#[async_trait]
pub trait CirculationQuery: Send + Sync {
    /// List audit records matching `filter`, newest first.
    async fn list_activities(&self, filter: ActivityFilter)
    -> Result<Vec<LoanActivity>, Error>;
}
