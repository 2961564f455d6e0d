//! Loan activity audit records.
//!
//! A loan activity is a denormalised audit record written whenever a book's
//! loan status changes. It snapshots the book title and client name at flip
//! time so the log stays readable after either record is edited or deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::book::{Book, BookId};
use crate::domain::client::{Client, ClientId};

/// Direction of a loan status flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoanAction {
    /// The book left the shelf.
    Loaned,
    /// The book came back.
    Returned,
}

impl LoanAction {
    /// Stable wire label for the action.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loaned => "loaned",
            Self::Returned => "returned",
        }
    }

    /// Parse the stable wire label.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "loaned" => Some(Self::Loaned),
            "returned" => Some(Self::Returned),
            _ => None,
        }
    }
}

impl fmt::Display for LoanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised when rehydrating a stored activity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanActivityValidationError {
    /// The book-title snapshot was empty.
    EmptyBookTitle,
    /// The client-name snapshot was empty.
    EmptyClientName,
    /// The action label was not `loaned` or `returned`.
    UnknownAction,
}

impl fmt::Display for LoanActivityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBookTitle => write!(f, "book title snapshot must not be empty"),
            Self::EmptyClientName => write!(f, "client name snapshot must not be empty"),
            Self::UnknownAction => write!(f, "action must be either loaned or returned"),
        }
    }
}

impl std::error::Error for LoanActivityValidationError {}

/// Stored fields accepted by [`LoanActivity::from_parts`].
#[derive(Debug, Clone)]
pub struct LoanActivityDraft {
    /// Stable identifier.
    pub id: Uuid,
    /// Book whose status flipped.
    pub book_id: BookId,
    /// Title snapshot taken at flip time.
    pub book_title: String,
    /// Borrowing client.
    pub client_id: ClientId,
    /// Name snapshot taken at flip time.
    pub client_name: String,
    /// Direction of the flip.
    pub action: LoanAction,
    /// When the flip was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Denormalised loan audit record. Append-only; never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "LoanActivityDto", into = "LoanActivityDto")]
pub struct LoanActivity {
    #[schema(value_type = String)]
    id: Uuid,
    #[schema(value_type = String)]
    book_id: BookId,
    #[schema(example = "The Left Hand of Darkness")]
    book_title: String,
    #[schema(value_type = String)]
    client_id: ClientId,
    #[schema(example = "Iris Chang")]
    client_name: String,
    #[schema(value_type = String, example = "loaned")]
    action: LoanAction,
    recorded_at: DateTime<Utc>,
}

impl LoanActivity {
    /// Snapshot a status flip into a fresh audit record.
    pub fn record(book: &Book, client: &Client, action: LoanAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_id: book.id(),
            book_title: book.title().to_owned(),
            client_id: client.id(),
            client_name: client.full_name().to_owned(),
            action,
            recorded_at: Utc::now(),
        }
    }

    /// Rehydrate a stored record, validating the snapshots.
    pub fn from_parts(draft: LoanActivityDraft) -> Result<Self, LoanActivityValidationError> {
        let LoanActivityDraft {
            id,
            book_id,
            book_title,
            client_id,
            client_name,
            action,
            recorded_at,
        } = draft;
        if book_title.trim().is_empty() {
            return Err(LoanActivityValidationError::EmptyBookTitle);
        }
        if client_name.trim().is_empty() {
            return Err(LoanActivityValidationError::EmptyClientName);
        }
        Ok(Self {
            id,
            book_id,
            book_title,
            client_id,
            client_name,
            action,
            recorded_at,
        })
    }

    /// Stable identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Book whose status flipped.
    pub const fn book_id(&self) -> BookId {
        self.book_id
    }

    /// Title snapshot taken at flip time.
    pub fn book_title(&self) -> &str {
        self.book_title.as_str()
    }

    /// Borrowing client.
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Name snapshot taken at flip time.
    pub fn client_name(&self) -> &str {
        self.client_name.as_str()
    }

    /// Direction of the flip.
    pub const fn action(&self) -> LoanAction {
        self.action
    }

    /// When the flip was recorded.
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct LoanActivityDto {
    id: Uuid,
    book_id: Uuid,
    book_title: String,
    client_id: Uuid,
    client_name: String,
    action: String,
    recorded_at: DateTime<Utc>,
}

impl From<LoanActivity> for LoanActivityDto {
    fn from(value: LoanActivity) -> Self {
        let LoanActivity {
            id,
            book_id,
            book_title,
            client_id,
            client_name,
            action,
            recorded_at,
        } = value;
        Self {
            id,
            book_id: *book_id.as_uuid(),
            book_title,
            client_id: *client_id.as_uuid(),
            client_name,
            action: action.as_str().to_owned(),
            recorded_at,
        }
    }
}

impl TryFrom<LoanActivityDto> for LoanActivity {
    type Error = LoanActivityValidationError;

    fn try_from(value: LoanActivityDto) -> Result<Self, Self::Error> {
        let action = LoanAction::parse(&value.action)
            .ok_or(LoanActivityValidationError::UnknownAction)?;
        LoanActivity::from_parts(LoanActivityDraft {
            id: value.id,
            book_id: BookId::from_uuid(value.book_id),
            book_title: value.book_title,
            client_id: ClientId::from_uuid(value.client_id),
            client_name: value.client_name,
            action,
            recorded_at: value.recorded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{BookDraft, LoanStatus};
    use crate::domain::client::ClientDraft;
    use crate::domain::contact::EmailAddress;
    use rstest::rstest;

    fn book() -> Book {
        Book::new(BookDraft {
            id: BookId::random(),
            title: "Kindred".into(),
            author: "Octavia E. Butler".into(),
            isbn: None,
            category: "Science Fiction".into(),
            publication_year: Some(1979),
            status: LoanStatus::Available,
        })
        .expect("valid book")
    }

    fn client() -> Client {
        Client::new(ClientDraft {
            id: ClientId::random(),
            full_name: "Iris Chang".into(),
            email: EmailAddress::new("iris@example.com").expect("valid email"),
            phone: None,
        })
        .expect("valid client")
    }

    #[rstest]
    fn record_snapshots_title_and_name() {
        let book = book();
        let client = client();
        let activity = LoanActivity::record(&book, &client, LoanAction::Loaned);
        assert_eq!(activity.book_title(), "Kindred");
        assert_eq!(activity.client_name(), "Iris Chang");
        assert_eq!(activity.book_id(), book.id());
        assert_eq!(activity.client_id(), client.id());
    }

    #[rstest]
    fn rejects_empty_snapshots() {
        let draft = LoanActivityDraft {
            id: Uuid::new_v4(),
            book_id: BookId::random(),
            book_title: " ".into(),
            client_id: ClientId::random(),
            client_name: "Iris Chang".into(),
            action: LoanAction::Loaned,
            recorded_at: Utc::now(),
        };
        assert_eq!(
            LoanActivity::from_parts(draft).unwrap_err(),
            LoanActivityValidationError::EmptyBookTitle
        );
    }

    #[rstest]
    fn round_trips_json() {
        let activity = LoanActivity::record(&book(), &client(), LoanAction::Returned);
        let json = serde_json::to_string(&activity).expect("serialise");
        let back: LoanActivity = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, activity);
    }
}
