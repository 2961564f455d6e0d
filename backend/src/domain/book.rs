//! Book catalogue data model.
//!
//! A book carries its bibliographic fields plus the current loan status.
//! Status only changes through the circulation operations; bibliographic
//! updates never touch it.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum length for a book title.
pub const TITLE_MAX: usize = 200;
/// Maximum length for an author name.
pub const AUTHOR_MAX: usize = 120;
/// Maximum length for a category label.
pub const CATEGORY_MAX: usize = 60;
/// Earliest accepted publication year.
pub const PUBLICATION_YEAR_MIN: i32 = 1000;
/// Latest accepted publication year.
pub const PUBLICATION_YEAR_MAX: i32 = 2100;

/// Validation errors raised by the book constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// The title was empty after trimming.
    EmptyTitle,
    /// The title exceeded [`TITLE_MAX`] characters.
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The author was empty after trimming.
    EmptyAuthor,
    /// The author exceeded [`AUTHOR_MAX`] characters.
    AuthorTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The category was empty after trimming.
    EmptyCategory,
    /// The category exceeded [`CATEGORY_MAX`] characters.
    CategoryTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The ISBN was not a 10- or 13-digit form.
    InvalidIsbn,
    /// The publication year fell outside the accepted range.
    PublicationYearOutOfRange {
        /// Earliest accepted year.
        min: i32,
        /// Latest accepted year.
        max: i32,
    },
    /// A loaned status arrived without a borrower reference.
    MissingBorrower,
    /// The status label was not `available` or `loaned`.
    UnknownStatus,
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::EmptyAuthor => write!(f, "author must not be empty"),
            Self::AuthorTooLong { max } => write!(f, "author must be at most {max} characters"),
            Self::EmptyCategory => write!(f, "category must not be empty"),
            Self::CategoryTooLong { max } => {
                write!(f, "category must be at most {max} characters")
            }
            Self::InvalidIsbn => write!(f, "isbn must contain 10 or 13 digits"),
            Self::PublicationYearOutOfRange { min, max } => {
                write!(f, "publication year must fall between {min} and {max}")
            }
            Self::MissingBorrower => write!(f, "a loaned book must reference its borrower"),
            Self::UnknownStatus => write!(f, "status must be either available or loaned"),
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Stable book identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(Uuid);

impl BookId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static ISBN_RE: OnceLock<Regex> = OnceLock::new();

fn isbn_regex() -> &'static Regex {
    ISBN_RE.get_or_init(|| {
        // Digits with optional hyphen separators; the final character of a
        // 10-digit form may be the X check digit.
        let pattern = r"^(?:\d[- ]?){9}(?:\d|X)$|^(?:\d[- ]?){12}\d$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("isbn regex failed to compile: {error}"))
    })
}

/// Validated ISBN-10 or ISBN-13 (hyphens and spaces tolerated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Validate and construct an [`Isbn`].
    pub fn new(raw: impl Into<String>) -> Result<Self, BookValidationError> {
        let raw = raw.into();
        if isbn_regex().is_match(raw.trim()) {
            Ok(Self(raw.trim().to_owned()))
        } else {
            Err(BookValidationError::InvalidIsbn)
        }
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = BookValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Current loan status of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    /// The book sits on the shelf and may be loaned.
    Available,
    /// The book is out with the referenced client.
    Loaned {
        /// Identifier of the borrowing client.
        client_id: Uuid,
    },
}

impl LoanStatus {
    /// Whether the book may currently be loaned.
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// The borrowing client, when the book is out.
    pub const fn borrower(&self) -> Option<Uuid> {
        match self {
            Self::Available => None,
            Self::Loaned { client_id } => Some(*client_id),
        }
    }

    /// Stable wire label for the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Loaned { .. } => "loaned",
        }
    }
}

/// Unvalidated book fields accepted by [`Book::new`].
#[derive(Debug, Clone)]
pub struct BookDraft {
    /// Stable identifier.
    pub id: BookId,
    /// Title shown in the catalogue.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Optional ISBN.
    pub isbn: Option<Isbn>,
    /// Shelf category label.
    pub category: String,
    /// Optional publication year.
    pub publication_year: Option<i32>,
    /// Current loan status.
    pub status: LoanStatus,
}

/// Bibliographic fields accepted by [`Book::apply_update`].
///
/// Loan status is deliberately absent: it is owned by the circulation
/// workflow.
#[derive(Debug, Clone)]
pub struct BookUpdate {
    /// Replacement title.
    pub title: String,
    /// Replacement author.
    pub author: String,
    /// Replacement ISBN, cleared when absent.
    pub isbn: Option<Isbn>,
    /// Replacement category.
    pub category: String,
    /// Replacement publication year, cleared when absent.
    pub publication_year: Option<i32>,
}

/// Catalogue book.
///
/// ## Invariants
/// - `title`, `author`, and `category` are non-empty once trimmed.
/// - `publication_year` falls within the accepted range when present.
/// - A `loaned` status always carries the borrower's client id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "BookDto", into = "BookDto")]
pub struct Book {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: BookId,
    #[schema(example = "The Left Hand of Darkness")]
    title: String,
    #[schema(example = "Ursula K. Le Guin")]
    author: String,
    #[schema(value_type = Option<String>, example = "978-0-441-47812-5")]
    isbn: Option<Isbn>,
    #[schema(example = "Science Fiction")]
    category: String,
    #[schema(example = 1969)]
    publication_year: Option<i32>,
    #[schema(value_type = String, example = "available")]
    status: LoanStatus,
}

fn validate_text(
    value: &str,
    max: usize,
    empty: BookValidationError,
    too_long: BookValidationError,
) -> Result<String, BookValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(empty);
    }
    if trimmed.chars().count() > max {
        return Err(too_long);
    }
    Ok(trimmed.to_owned())
}

fn validate_year(year: Option<i32>) -> Result<Option<i32>, BookValidationError> {
    match year {
        Some(year) if !(PUBLICATION_YEAR_MIN..=PUBLICATION_YEAR_MAX).contains(&year) => {
            Err(BookValidationError::PublicationYearOutOfRange {
                min: PUBLICATION_YEAR_MIN,
                max: PUBLICATION_YEAR_MAX,
            })
        }
        other => Ok(other),
    }
}

impl Book {
    /// Validate a draft and construct a [`Book`].
    pub fn new(draft: BookDraft) -> Result<Self, BookValidationError> {
        let BookDraft {
            id,
            title,
            author,
            isbn,
            category,
            publication_year,
            status,
        } = draft;

        Ok(Self {
            id,
            title: validate_text(
                &title,
                TITLE_MAX,
                BookValidationError::EmptyTitle,
                BookValidationError::TitleTooLong { max: TITLE_MAX },
            )?,
            author: validate_text(
                &author,
                AUTHOR_MAX,
                BookValidationError::EmptyAuthor,
                BookValidationError::AuthorTooLong { max: AUTHOR_MAX },
            )?,
            isbn,
            category: validate_text(
                &category,
                CATEGORY_MAX,
                BookValidationError::EmptyCategory,
                BookValidationError::CategoryTooLong { max: CATEGORY_MAX },
            )?,
            publication_year: validate_year(publication_year)?,
            status,
        })
    }

    /// Stable identifier.
    pub const fn id(&self) -> BookId {
        self.id
    }

    /// Title shown in the catalogue.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Author name.
    pub fn author(&self) -> &str {
        self.author.as_str()
    }

    /// Optional validated ISBN.
    pub const fn isbn(&self) -> Option<&Isbn> {
        self.isbn.as_ref()
    }

    /// Shelf category label.
    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    /// Optional publication year.
    pub const fn publication_year(&self) -> Option<i32> {
        self.publication_year
    }

    /// Current loan status.
    pub const fn status(&self) -> LoanStatus {
        self.status
    }

    /// Replace the bibliographic fields, preserving the loan status.
    pub fn apply_update(&mut self, update: BookUpdate) -> Result<(), BookValidationError> {
        let updated = Self::new(BookDraft {
            id: self.id,
            title: update.title,
            author: update.author,
            isbn: update.isbn,
            category: update.category,
            publication_year: update.publication_year,
            status: self.status,
        })?;
        *self = updated;
        Ok(())
    }

    /// Flip the status to loaned. Fails when the book is already out.
    pub fn loan_to(&mut self, client_id: Uuid) -> Result<(), LoanStateError> {
        match self.status {
            LoanStatus::Available => {
                self.status = LoanStatus::Loaned { client_id };
                Ok(())
            }
            LoanStatus::Loaned { .. } => Err(LoanStateError::AlreadyLoaned),
        }
    }

    /// Flip the status back to available, returning the previous borrower.
    pub fn mark_returned(&mut self) -> Result<Uuid, LoanStateError> {
        match self.status {
            LoanStatus::Loaned { client_id } => {
                self.status = LoanStatus::Available;
                Ok(client_id)
            }
            LoanStatus::Available => Err(LoanStateError::NotLoaned),
        }
    }

    /// Case-insensitive substring match against title, author, and category.
    ///
    /// Search filters the fetched list in memory rather than pushing
    /// predicates to the store.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.category.to_lowercase().contains(&needle)
    }
}

/// Invalid status transitions attempted by the circulation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoanStateError {
    /// Loan requested while the book is already out.
    #[error("book is already loaned")]
    AlreadyLoaned,
    /// Return requested while the book sits on the shelf.
    #[error("book is not currently loaned")]
    NotLoaned,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct BookDto {
    id: Uuid,
    title: String,
    author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    isbn: Option<String>,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    publication_year: Option<i32>,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    borrowed_by: Option<Uuid>,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let status = value.status.as_str().to_owned();
        let borrowed_by = value.status.borrower();
        let Book {
            id,
            title,
            author,
            isbn,
            category,
            publication_year,
            status: _,
        } = value;
        Self {
            id: *id.as_uuid(),
            title,
            author,
            isbn: isbn.map(String::from),
            category,
            publication_year,
            status,
            borrowed_by,
        }
    }
}

impl TryFrom<BookDto> for Book {
    type Error = BookValidationError;

    fn try_from(value: BookDto) -> Result<Self, Self::Error> {
        let status = match (value.status.as_str(), value.borrowed_by) {
            ("available", _) => LoanStatus::Available,
            ("loaned", Some(client_id)) => LoanStatus::Loaned { client_id },
            ("loaned", None) => return Err(BookValidationError::MissingBorrower),
            _ => return Err(BookValidationError::UnknownStatus),
        };
        let isbn = value.isbn.map(Isbn::new).transpose()?;
        Book::new(BookDraft {
            id: BookId::from_uuid(value.id),
            title: value.title,
            author: value.author,
            isbn,
            category: value.category,
            publication_year: value.publication_year,
            status,
        })
    }
}
