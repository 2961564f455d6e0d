//! Port abstraction for loan-activity persistence adapters.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::book::BookId;
use crate::domain::client::ClientId;
use crate::domain::loan::LoanActivity;

/// Optional predicates applied to activity listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    /// Restrict to one book's log.
    pub book_id: Option<BookId>,
    /// Restrict to one client's log.
    pub client_id: Option<ClientId>,
}

/// Driven port over the `loan_activities` collection.
///
/// The log is append-only; records are only ever removed as a batch when
/// their book or client is deleted.
#[async_trait]
pub trait LoanActivityRepository: Send + Sync {
    /// Append one audit record.
    async fn append(&self, activity: &LoanActivity) -> Result<(), RepositoryError>;

    /// List matching records, newest first.
    async fn list(&self, filter: ActivityFilter) -> Result<Vec<LoanActivity>, RepositoryError>;

    /// The `limit` newest records across the whole log.
    async fn list_recent(&self, limit: usize) -> Result<Vec<LoanActivity>, RepositoryError>;

    /// Batch-delete every record for a book; returns the count removed.
    async fn delete_for_book(&self, book_id: BookId) -> Result<u64, RepositoryError>;

    /// Batch-delete every record for a client; returns the count removed.
    async fn delete_for_client(&self, client_id: ClientId) -> Result<u64, RepositoryError>;
}
