//! Catalogue domain service.
//!
//! Implements the book command and query ports over a book repository and
//! the activity log, enforcing the loan-state guard on deletion and the
//! cascade that removes a deleted book's audit records.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest, paginate};
use serde_json::json;

use crate::domain::book::{Book, BookDraft, BookId, BookUpdate, BookValidationError};
use crate::domain::error::Error;
use crate::domain::ports::{
    BookRepository, BookSearch, CatalogueCommand, CatalogueQuery, LoanActivityRepository,
};

/// Catalogue service implementing the driving ports.
#[derive(Clone)]
pub struct CatalogueService<B, A> {
    books: Arc<B>,
    activities: Arc<A>,
}

impl<B, A> CatalogueService<B, A> {
    /// Create a new service over the given repositories.
    pub fn new(books: Arc<B>, activities: Arc<A>) -> Self {
        Self { books, activities }
    }
}

fn validation_error(error: &BookValidationError) -> Error {
    Error::invalid_request("invalid book payload").with_details(json!({
        "reason": error.to_string(),
    }))
}

impl<B, A> CatalogueService<B, A>
where
    B: BookRepository,
    A: LoanActivityRepository,
{
    async fn require_book(&self, id: BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("book repository"))?
            .ok_or_else(|| Error::not_found("book not found"))
    }
}

#[async_trait]
impl<B, A> CatalogueCommand for CatalogueService<B, A>
where
    B: BookRepository,
    A: LoanActivityRepository,
{
    async fn add_book(&self, draft: BookDraft) -> Result<Book, Error> {
        let book = Book::new(draft).map_err(|err| validation_error(&err))?;
        self.books
            .save(&book)
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        Ok(book)
    }

    async fn update_book(&self, id: BookId, update: BookUpdate) -> Result<Book, Error> {
        let mut book = self.require_book(id).await?;
        book.apply_update(update)
            .map_err(|err| validation_error(&err))?;
        self.books
            .save(&book)
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        Ok(book)
    }

    async fn remove_book(&self, id: BookId) -> Result<(), Error> {
        let book = self.require_book(id).await?;
        if !book.status().is_available() {
            return Err(Error::conflict("book is currently on loan"));
        }
        let removed = self
            .books
            .delete(id)
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        if !removed {
            return Err(Error::not_found("book not found"));
        }
        self.activities
            .delete_for_book(id)
            .await
            .map_err(|err| err.into_domain("activity repository"))?;
        Ok(())
    }
}

#[async_trait]
impl<B, A> CatalogueQuery for CatalogueService<B, A>
where
    B: BookRepository,
    A: LoanActivityRepository,
{
    async fn list_books(
        &self,
        search: BookSearch,
        page: PageRequest,
    ) -> Result<Page<Book>, Error> {
        let mut books = self
            .books
            .list()
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        books.retain(|book| search.matches(book));
        books.sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase()));
        paginate(books, &page).map_err(|_| Error::invalid_request("cursor offset out of range"))
    }

    async fn get_book(&self, id: BookId) -> Result<Book, Error> {
        self.require_book(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{Isbn, LoanStatus};
    use crate::domain::client::{Client, ClientDraft, ClientId};
    use crate::domain::contact::EmailAddress;
    use crate::domain::error::ErrorCode;
    use crate::domain::ports::ActivityFilter;
    use crate::domain::loan::{LoanAction, LoanActivity};
    use crate::outbound::memory::{InMemoryBookRepository, InMemoryLoanActivityRepository};

    fn draft(title: &str) -> BookDraft {
        BookDraft {
            id: BookId::random(),
            title: title.to_owned(),
            author: "Ursula K. Le Guin".to_owned(),
            isbn: Some(Isbn::new("978-0-441-47812-5").expect("valid isbn")),
            category: "Fiction".to_owned(),
            publication_year: Some(1969),
            status: LoanStatus::Available,
        }
    }

    fn sample_client() -> Client {
        Client::new(ClientDraft {
            id: ClientId::random(),
            full_name: "Ada Lovelace".to_owned(),
            email: EmailAddress::new("ada@example.org").expect("valid email"),
            phone: None,
        })
        .expect("valid client")
    }

    fn service() -> CatalogueService<InMemoryBookRepository, InMemoryLoanActivityRepository> {
        CatalogueService::new(
            Arc::new(InMemoryBookRepository::default()),
            Arc::new(InMemoryLoanActivityRepository::default()),
        )
    }

    #[tokio::test]
    async fn add_book_starts_available() {
        let service = service();
        let book = service
            .add_book(draft("The Left Hand of Darkness"))
            .await
            .expect("book created");
        assert!(book.status().is_available());
        let fetched = service.get_book(book.id()).await.expect("book fetched");
        assert_eq!(fetched.title(), "The Left Hand of Darkness");
    }

    #[tokio::test]
    async fn add_book_rejects_invalid_payload() {
        let service = service();
        let mut bad = draft("The Dispossessed");
        bad.title = "   ".to_owned();
        let error = service.add_book(bad).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert!(error.details().is_some());
    }

    #[tokio::test]
    async fn update_preserves_loan_status() {
        let service = service();
        let book = service.add_book(draft("Earthsea")).await.expect("created");
        let borrower = uuid::Uuid::new_v4();
        let mut loaned = book.clone();
        loaned.loan_to(borrower).expect("loanable");
        service.books.save(&loaned).await.expect("saved");

        let update = BookUpdate {
            title: "A Wizard of Earthsea".to_owned(),
            author: loaned.author().to_owned(),
            isbn: loaned.isbn().cloned(),
            category: loaned.category().to_owned(),
            publication_year: loaned.publication_year(),
        };
        let updated = service
            .update_book(book.id(), update)
            .await
            .expect("updated");
        assert_eq!(updated.title(), "A Wizard of Earthsea");
        assert_eq!(updated.status().borrower(), Some(borrower));
    }

    #[tokio::test]
    async fn remove_loaned_book_conflicts() {
        let service = service();
        let book = service.add_book(draft("Lavinia")).await.expect("created");
        let mut loaned = book.clone();
        loaned.loan_to(uuid::Uuid::new_v4()).expect("loanable");
        service.books.save(&loaned).await.expect("saved");

        let error = service.remove_book(book.id()).await.expect_err("blocked");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn remove_book_cascades_activity_records() {
        let service = service();
        let book = service.add_book(draft("Orsinia")).await.expect("created");
        let activity = LoanActivity::record(&book, &sample_client(), LoanAction::Loaned);
        service.activities.append(&activity).await.expect("logged");

        service.remove_book(book.id()).await.expect("deleted");
        let remaining = service
            .activities
            .list(ActivityFilter::default())
            .await
            .expect("listed");
        assert!(remaining.is_empty());
        let error = service.get_book(book.id()).await.expect_err("gone");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn list_books_filters_and_sorts_by_title() {
        let service = service();
        service.add_book(draft("zebra tales")).await.expect("z");
        service.add_book(draft("Aardvark Atlas")).await.expect("a");
        service.add_book(draft("Middle March")).await.expect("m");

        let page = service
            .list_books(BookSearch::all(), PageRequest::first_page(10))
            .await
            .expect("page");
        let titles: Vec<_> = page.items.iter().map(Book::title).collect();
        assert_eq!(titles, ["Aardvark Atlas", "Middle March", "zebra tales"]);

        let filtered = service
            .list_books(BookSearch::for_term("aard"), PageRequest::first_page(10))
            .await
            .expect("filtered");
        assert_eq!(filtered.items.len(), 1);
    }
}
