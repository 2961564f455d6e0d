//! Client (library patron) data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::contact::{ContactValidationError, EmailAddress, PhoneNumber};

/// Maximum length for a client's full name.
pub const CLIENT_NAME_MAX: usize = 120;

/// Validation errors raised by the client constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientValidationError {
    /// The full name was empty after trimming.
    EmptyName,
    /// The full name exceeded [`CLIENT_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// A contact field failed validation.
    Contact(ContactValidationError),
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::Contact(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ClientValidationError {}

impl From<ContactValidationError> for ClientValidationError {
    fn from(value: ContactValidationError) -> Self {
        Self::Contact(value)
    }
}

/// Stable client identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
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

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated client fields accepted by [`Client::new`].
#[derive(Debug, Clone)]
pub struct ClientDraft {
    /// Stable identifier.
    pub id: ClientId,
    /// Full name.
    pub full_name: String,
    /// Contact email.
    pub email: EmailAddress,
    /// Optional contact phone.
    pub phone: Option<PhoneNumber>,
}

/// Library patron.
///
/// ## Invariants
/// - `full_name` is non-empty once trimmed and at most [`CLIENT_NAME_MAX`]
///   characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ClientDto", into = "ClientDto")]
pub struct Client {
    #[schema(value_type = String, example = "7f9c31a2-34c9-4c32-9c6c-90df1c2f0b10")]
    id: ClientId,
    #[schema(example = "Iris Chang")]
    full_name: String,
    #[schema(value_type = String, example = "iris@example.com")]
    email: EmailAddress,
    #[schema(value_type = Option<String>, example = "+46 70-123 45 67")]
    phone: Option<PhoneNumber>,
}

impl Client {
    /// Validate a draft and construct a [`Client`].
    pub fn new(draft: ClientDraft) -> Result<Self, ClientValidationError> {
        let ClientDraft {
            id,
            full_name,
            email,
            phone,
        } = draft;
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return Err(ClientValidationError::EmptyName);
        }
        if trimmed.chars().count() > CLIENT_NAME_MAX {
            return Err(ClientValidationError::NameTooLong {
                max: CLIENT_NAME_MAX,
            });
        }
        Ok(Self {
            id,
            full_name: trimmed.to_owned(),
            email,
            phone,
        })
    }

    /// Stable identifier.
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Full name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Contact email.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Optional contact phone.
    pub const fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    /// Case-insensitive substring match against name and email.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.full_name.to_lowercase().contains(&needle)
            || self.email.as_ref().to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ClientDto {
    id: Uuid,
    full_name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
}

impl From<Client> for ClientDto {
    fn from(value: Client) -> Self {
        let Client {
            id,
            full_name,
            email,
            phone,
        } = value;
        Self {
            id: *id.as_uuid(),
            full_name,
            email: email.into(),
            phone: phone.map(String::from),
        }
    }
}

impl TryFrom<ClientDto> for Client {
    type Error = ClientValidationError;

    fn try_from(value: ClientDto) -> Result<Self, Self::Error> {
        Client::new(ClientDraft {
            id: ClientId::from_uuid(value.id),
            full_name: value.full_name,
            email: EmailAddress::new(value.email)?,
            phone: value.phone.map(PhoneNumber::new).transpose()?,
        })
    }
}
