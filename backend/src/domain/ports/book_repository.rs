//! Port abstraction for book persistence adapters.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::book::{Book, BookId};

/// Driven port over the `books` collection.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// List every book, title order.
    async fn list(&self) -> Result<Vec<Book>, RepositoryError>;

    /// Fetch a book by identifier.
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError>;

    /// Insert or update a book record.
    async fn save(&self, book: &Book) -> Result<(), RepositoryError>;

    /// Delete a book; returns whether a record existed.
    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError>;
}
