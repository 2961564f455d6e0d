//! PostgreSQL-backed `BookRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::book::{Book, BookDraft, BookId, Isbn, LoanStatus};
use crate::domain::ports::{BookRepository, RepositoryError};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{BookRow, BookWrite};
use super::pool::DbPool;
use super::schema::books;

/// Diesel-backed implementation of the `BookRepository` port.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_book(row: BookRow) -> Result<Book, RepositoryError> {
    let status = match (row.status.as_str(), row.borrowed_by) {
        ("available", _) => LoanStatus::Available,
        ("loaned", Some(client_id)) => LoanStatus::Loaned { client_id },
        ("loaned", None) => {
            return Err(corrupt_row("books", "loaned status without borrower"));
        }
        (other, _) => {
            return Err(corrupt_row(
                "books",
                format!("unrecognised status {other:?}"),
            ));
        }
    };
    let isbn = row
        .isbn
        .map(Isbn::new)
        .transpose()
        .map_err(|err| corrupt_row("books", err))?;

    Book::new(BookDraft {
        id: BookId::from_uuid(row.id),
        title: row.title,
        author: row.author,
        isbn,
        category: row.category,
        publication_year: row.publication_year,
        status,
    })
    .map_err(|err| corrupt_row("books", err))
}

fn book_to_write(book: &Book) -> BookWrite<'_> {
    BookWrite {
        id: *book.id().as_uuid(),
        title: book.title(),
        author: book.author(),
        isbn: book.isbn().map(AsRef::as_ref),
        category: book.category(),
        publication_year: book.publication_year(),
        status: book.status().as_str(),
        borrowed_by: book.status().borrower(),
    }
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BookRow> = books::table
            .select(BookRow::as_select())
            .order(books::title.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_book).collect()
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BookRow> = books::table
            .filter(books::id.eq(id.as_uuid()))
            .select(BookRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_book).transpose()
    }

    async fn save(&self, book: &Book) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = book_to_write(book);

        diesel::insert_into(books::table)
            .values(&write)
            .on_conflict(books::id)
            .do_update()
            .set(&write)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(books::table.filter(books::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; live-database paths are exercised by the
    //! integration environment.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(status: &str, borrowed_by: Option<Uuid>) -> BookRow {
        BookRow {
            id: Uuid::new_v4(),
            title: "Kindred".to_owned(),
            author: "Octavia E. Butler".to_owned(),
            isbn: Some("978-0-8070-8369-7".to_owned()),
            category: "Fiction".to_owned(),
            publication_year: Some(1979),
            status: status.to_owned(),
            borrowed_by,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn available_row_converts() {
        let book = row_to_book(row("available", None)).expect("converted");
        assert!(book.status().is_available());
        assert_eq!(book.title(), "Kindred");
    }

    #[rstest]
    fn loaned_row_carries_borrower() {
        let borrower = Uuid::new_v4();
        let book = row_to_book(row("loaned", Some(borrower))).expect("converted");
        assert_eq!(book.status().borrower(), Some(borrower));
    }

    #[rstest]
    #[case("loaned", None)]
    #[case("misplaced", None)]
    fn inconsistent_rows_are_rejected(#[case] status: &str, #[case] borrowed_by: Option<Uuid>) {
        let error = row_to_book(row(status, borrowed_by)).expect_err("rejected");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }

    #[rstest]
    fn write_struct_mirrors_status() {
        let book = row_to_book(row("available", None)).expect("converted");
        let write = book_to_write(&book);
        assert_eq!(write.status, "available");
        assert_eq!(write.borrowed_by, None);
    }
}
