//! Driving ports for the book catalogue.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::book::{Book, BookDraft, BookId, BookUpdate};
use crate::domain::error::Error;

/// Free-text predicate over title, author, and category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSearch {
    /// Case-insensitive substring; `None` matches everything.
    pub query: Option<String>,
}

impl BookSearch {
    /// A search matching every book.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A search for a specific term; blank input matches everything.
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

    /// Whether `book` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, book: &Book) -> bool {
        self.query
            .as_deref()
            .is_none_or(|term| book.matches_search(term))
    }
}

/// Mutating catalogue operations.
#[async_trait]
pub trait CatalogueCommand: Send + Sync {
    /// Register a new book; it starts available.
    async fn add_book(&self, draft: BookDraft) -> Result<Book, Error>;

    /// Replace a book's descriptive fields, preserving its loan status.
    async fn update_book(&self, id: BookId, update: BookUpdate) -> Result<Book, Error>;

    /// Delete a book and its activity history.
    ///
    /// Fails with `Conflict` while the book is on loan.
    async fn remove_book(&self, id: BookId) -> Result<(), Error>;
}

/// Read-only catalogue operations.
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Page through books matching `search`, ordered by title.
    async fn list_books(
        &self,
        search: BookSearch,
        page: PageRequest,
    ) -> Result<Page<Book>, Error>;

    /// Fetch one book or `NotFound`.
    async fn get_book(&self, id: BookId) -> Result<Book, Error>;
}
