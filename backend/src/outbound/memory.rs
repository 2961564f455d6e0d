//! In-memory repository adapters.
//!
//! Back every driven port with a mutex-guarded map. Used as the default
//! store when no database is configured, and as the fixture backend for
//! service and HTTP tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::book::{Book, BookId};
use crate::domain::client::{Client, ClientId};
use crate::domain::employee::{Employee, EmployeeId};
use crate::domain::loan::LoanActivity;
use crate::domain::ports::{
    ActivityFilter, BookRepository, ClientRepository, EmployeeRepository, LoanActivityRepository,
    RepositoryError, UserRepository,
};
use crate::domain::user::{UserRecord, Username};

fn poisoned() -> RepositoryError {
    RepositoryError::query("in-memory store mutex poisoned")
}

/// Book store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    books: Mutex<HashMap<BookId, Book>>,
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, RepositoryError> {
        let books = self.books.lock().map_err(|_| poisoned())?;
        Ok(books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let books = self.books.lock().map_err(|_| poisoned())?;
        Ok(books.get(&id).cloned())
    }

    async fn save(&self, book: &Book) -> Result<(), RepositoryError> {
        let mut books = self.books.lock().map_err(|_| poisoned())?;
        books.insert(book.id(), book.clone());
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        let mut books = self.books.lock().map_err(|_| poisoned())?;
        Ok(books.remove(&id).is_some())
    }
}

/// Client store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryClientRepository {
    clients: Mutex<HashMap<ClientId, Client>>,
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let clients = self.clients.lock().map_err(|_| poisoned())?;
        Ok(clients.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let clients = self.clients.lock().map_err(|_| poisoned())?;
        Ok(clients.get(&id).cloned())
    }

    async fn save(&self, client: &Client) -> Result<(), RepositoryError> {
        let mut clients = self.clients.lock().map_err(|_| poisoned())?;
        clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError> {
        let mut clients = self.clients.lock().map_err(|_| poisoned())?;
        Ok(clients.remove(&id).is_some())
    }
}

/// Employee store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeRepository {
    employees: Mutex<HashMap<EmployeeId, Employee>>,
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let employees = self.employees.lock().map_err(|_| poisoned())?;
        Ok(employees.values().cloned().collect())
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let employees = self.employees.lock().map_err(|_| poisoned())?;
        Ok(employees.get(&id).cloned())
    }

    async fn save(&self, employee: &Employee) -> Result<(), RepositoryError> {
        let mut employees = self.employees.lock().map_err(|_| poisoned())?;
        employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        let mut employees = self.employees.lock().map_err(|_| poisoned())?;
        Ok(employees.remove(&id).is_some())
    }
}

/// Activity log backed by a `Vec` in append order.
#[derive(Debug, Default)]
pub struct InMemoryLoanActivityRepository {
    entries: Mutex<Vec<LoanActivity>>,
}

#[async_trait]
impl LoanActivityRepository for InMemoryLoanActivityRepository {
    async fn append(&self, activity: &LoanActivity) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.push(activity.clone());
        Ok(())
    }

    async fn list(&self, filter: ActivityFilter) -> Result<Vec<LoanActivity>, RepositoryError> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        let mut matching: Vec<LoanActivity> = entries
            .iter()
            .filter(|entry| {
                filter.book_id.is_none_or(|id| entry.book_id() == id)
                    && filter.client_id.is_none_or(|id| entry.client_id() == id)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.recorded_at().cmp(&a.recorded_at()));
        Ok(matching)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<LoanActivity>, RepositoryError> {
        let mut all = self.list(ActivityFilter::default()).await?;
        all.truncate(limit);
        Ok(all)
    }

    async fn delete_for_book(&self, book_id: BookId) -> Result<u64, RepositoryError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|entry| entry.book_id() != book_id);
        Ok((before - entries.len()) as u64)
    }

    async fn delete_for_client(&self, client_id: ClientId) -> Result<u64, RepositoryError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|entry| entry.client_id() != client_id);
        Ok((before - entries.len()) as u64)
    }
}

/// Credential store backed by a `HashMap` keyed on username.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Username, UserRecord>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.get(username).cloned())
    }

    async fn upsert(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        users.insert(user.username().clone(), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{BookDraft, LoanStatus};
    use crate::domain::client::ClientDraft;
    use crate::domain::contact::EmailAddress;
    use crate::domain::loan::LoanAction;

    fn book(title: &str) -> Book {
        Book::new(BookDraft {
            id: BookId::random(),
            title: title.to_owned(),
            author: "Author".to_owned(),
            isbn: None,
            category: "Fiction".to_owned(),
            publication_year: None,
            status: LoanStatus::Available,
        })
        .expect("valid book")
    }

    fn client(name: &str) -> Client {
        Client::new(ClientDraft {
            id: ClientId::random(),
            full_name: name.to_owned(),
            email: EmailAddress::new("reader@example.org").expect("valid email"),
            phone: None,
        })
        .expect("valid client")
    }

    #[tokio::test]
    async fn book_save_find_delete_round_trip() {
        let repo = InMemoryBookRepository::default();
        let book = book("Kindred");
        repo.save(&book).await.expect("saved");
        assert!(
            repo.find_by_id(book.id())
                .await
                .expect("queried")
                .is_some()
        );
        assert!(repo.delete(book.id()).await.expect("deleted"));
        assert!(!repo.delete(book.id()).await.expect("second delete"));
    }

    #[tokio::test]
    async fn activity_listing_is_newest_first() {
        let repo = InMemoryLoanActivityRepository::default();
        let reader = client("Reader");
        let first = LoanActivity::record(&book("First"), &reader, LoanAction::Loaned);
        let second = LoanActivity::record(&book("Second"), &reader, LoanAction::Loaned);
        repo.append(&first).await.expect("logged");
        repo.append(&second).await.expect("logged");

        let listed = repo.list(ActivityFilter::default()).await.expect("listed");
        assert_eq!(listed.len(), 2);
        assert!(listed[0].recorded_at() >= listed[1].recorded_at());
    }

    #[tokio::test]
    async fn batch_deletes_report_counts() {
        let repo = InMemoryLoanActivityRepository::default();
        let reader = client("Reader");
        let kept_book = book("Kept");
        let dropped_book = book("Dropped");
        repo.append(&LoanActivity::record(
            &dropped_book,
            &reader,
            LoanAction::Loaned,
        ))
        .await
        .expect("logged");
        repo.append(&LoanActivity::record(
            &dropped_book,
            &reader,
            LoanAction::Returned,
        ))
        .await
        .expect("logged");
        repo.append(&LoanActivity::record(&kept_book, &reader, LoanAction::Loaned))
            .await
            .expect("logged");

        let removed = repo
            .delete_for_book(dropped_book.id())
            .await
            .expect("batch delete");
        assert_eq!(removed, 2);
        let remaining = repo.list(ActivityFilter::default()).await.expect("listed");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].book_id(), kept_book.id());
    }
}
