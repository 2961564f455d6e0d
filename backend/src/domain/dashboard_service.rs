//! Landing-page summary service.
//!
//! Aggregates collection counts and the latest circulation activity in
//! memory, matching the modest collection sizes the system is built for.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::dashboard::{DashboardSummary, RECENT_ACTIVITY_LIMIT};
use crate::domain::error::Error;
use crate::domain::ports::{
    BookRepository, ClientRepository, DashboardQuery, EmployeeRepository, LoanActivityRepository,
};

/// Dashboard service implementing the driving port.
#[derive(Clone)]
pub struct DashboardService<B, C, E, A> {
    books: Arc<B>,
    clients: Arc<C>,
    employees: Arc<E>,
    activities: Arc<A>,
}

impl<B, C, E, A> DashboardService<B, C, E, A> {
    /// Create a new service over the given repositories.
    pub fn new(books: Arc<B>, clients: Arc<C>, employees: Arc<E>, activities: Arc<A>) -> Self {
        Self {
            books,
            clients,
            employees,
            activities,
        }
    }
}

#[async_trait]
impl<B, C, E, A> DashboardQuery for DashboardService<B, C, E, A>
where
    B: BookRepository,
    C: ClientRepository,
    E: EmployeeRepository,
    A: LoanActivityRepository,
{
    async fn summary(&self) -> Result<DashboardSummary, Error> {
        let books = self
            .books
            .list()
            .await
            .map_err(|err| err.into_domain("book repository"))?;
        let clients = self
            .clients
            .list()
            .await
            .map_err(|err| err.into_domain("client repository"))?;
        let employees = self
            .employees
            .list()
            .await
            .map_err(|err| err.into_domain("employee repository"))?;
        let recent_activity = self
            .activities
            .list_recent(RECENT_ACTIVITY_LIMIT)
            .await
            .map_err(|err| err.into_domain("activity repository"))?;

        let available_books = books
            .iter()
            .filter(|book| book.status().is_available())
            .count();
        let total_books = books.len();

        Ok(DashboardSummary {
            total_books: count("book", total_books)?,
            available_books: count("available book", available_books)?,
            loaned_books: count("loaned book", total_books - available_books)?,
            total_clients: count("client", clients.len())?,
            total_employees: count("employee", employees.len())?,
            recent_activity,
        })
    }
}

fn count(label: &str, value: usize) -> Result<u64, Error> {
    u64::try_from(value).map_err(|_| Error::internal(format!("{label} count overflows u64")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{Book, BookDraft, BookId, LoanStatus};
    use crate::domain::client::{Client, ClientDraft, ClientId};
    use crate::domain::contact::EmailAddress;
    use crate::domain::loan::{LoanAction, LoanActivity};
    use crate::outbound::memory::{
        InMemoryBookRepository, InMemoryClientRepository, InMemoryEmployeeRepository,
        InMemoryLoanActivityRepository,
    };
    use uuid::Uuid;

    type MemoryDashboard = DashboardService<
        InMemoryBookRepository,
        InMemoryClientRepository,
        InMemoryEmployeeRepository,
        InMemoryLoanActivityRepository,
    >;

    fn service() -> MemoryDashboard {
        DashboardService::new(
            Arc::new(InMemoryBookRepository::default()),
            Arc::new(InMemoryClientRepository::default()),
            Arc::new(InMemoryEmployeeRepository::default()),
            Arc::new(InMemoryLoanActivityRepository::default()),
        )
    }

    fn book(title: &str, status: LoanStatus) -> Book {
        Book::new(BookDraft {
            id: BookId::random(),
            title: title.to_owned(),
            author: "Author".to_owned(),
            isbn: None,
            category: "Fiction".to_owned(),
            publication_year: None,
            status,
        })
        .expect("valid book")
    }

    fn client() -> Client {
        Client::new(ClientDraft {
            id: ClientId::random(),
            full_name: "Reader".to_owned(),
            email: EmailAddress::new("reader@example.org").expect("valid email"),
            phone: None,
        })
        .expect("valid client")
    }

    #[tokio::test]
    async fn summary_counts_by_status() {
        let service = service();
        service
            .books
            .save(&book("On Shelf", LoanStatus::Available))
            .await
            .expect("saved");
        service
            .books
            .save(&book(
                "Out",
                LoanStatus::Loaned {
                    client_id: Uuid::new_v4(),
                },
            ))
            .await
            .expect("saved");
        service.clients.save(&client()).await.expect("saved");

        let summary = service.summary().await.expect("summary");
        assert_eq!(summary.total_books, 2);
        assert_eq!(summary.available_books, 1);
        assert_eq!(summary.loaned_books, 1);
        assert_eq!(summary.total_clients, 1);
        assert_eq!(summary.total_employees, 0);
    }

    #[tokio::test]
    async fn summary_caps_recent_activity() {
        let service = service();
        let reader = client();
        for n in 0..(RECENT_ACTIVITY_LIMIT + 5) {
            let title = format!("Book {n}");
            let entry = LoanActivity::record(
                &book(&title, LoanStatus::Available),
                &reader,
                LoanAction::Loaned,
            );
            service.activities.append(&entry).await.expect("logged");
        }

        let summary = service.summary().await.expect("summary");
        assert_eq!(summary.recent_activity.len(), RECENT_ACTIVITY_LIMIT);
    }
}
