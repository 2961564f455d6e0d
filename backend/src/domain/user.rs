//! Authentication user records.
//!
//! [`UserRecord`] is the stored credential record with a display name and
//! staff role. Credentials never cross the wire; [`AuthenticatedUser`] is the
//! serialisable projection handed to adapters after a successful login.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::auth::{PasswordDigest, StaffRole};

/// Minimum allowed length for a display name.
pub const DISPLAY_NAME_MIN: usize = 3;
/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 64;

/// Validation errors raised by the user newtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The username was empty after trimming.
    EmptyUsername,
    /// The username exceeded [`USERNAME_MAX`] characters.
    UsernameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The username contained characters outside letters, digits, `.`, `_`, `-`.
    UsernameInvalidCharacters,
    /// The display name was empty after trimming.
    EmptyDisplayName,
    /// The display name was shorter than [`DISPLAY_NAME_MIN`] characters.
    DisplayNameTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// The display name exceeded [`DISPLAY_NAME_MAX`] characters.
    DisplayNameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The display name contained characters outside letters, numbers,
    /// spaces, or underscores.
    DisplayNameInvalidCharacters,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, digits, dots, underscores, or hyphens",
            ),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooShort { min } => {
                write!(f, "display name must be at least {min} characters")
            }
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::DisplayNameInvalidCharacters => write!(
                f,
                "display name may only contain letters, numbers, spaces, or underscores",
            ),
        }
    }
}

impl std::error::Error for UserValidationError {}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._\-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Login name used to look up a credential record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static DISPLAY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn display_name_regex() -> &'static Regex {
    DISPLAY_NAME_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        let pattern = "^[A-Za-z0-9_ ]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("display name regex failed to compile: {error}"))
    })
}

/// Human readable display name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        let length = raw.chars().count();
        if length < DISPLAY_NAME_MIN {
            return Err(UserValidationError::DisplayNameTooShort {
                min: DISPLAY_NAME_MIN,
            });
        }
        if length > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        if !display_name_regex().is_match(&raw) {
            return Err(UserValidationError::DisplayNameInvalidCharacters);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Credential record held by the user repository.
///
/// Deliberately not serialisable: the digest must never reach an adapter
/// boundary by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: Uuid,
    username: Username,
    display_name: DisplayName,
    role: StaffRole,
    digest: PasswordDigest,
    active: bool,
}

impl UserRecord {
    /// Assemble a record from validated components.
    pub const fn new(
        id: Uuid,
        username: Username,
        display_name: DisplayName,
        role: StaffRole,
        digest: PasswordDigest,
        active: bool,
    ) -> Self {
        Self {
            id,
            username,
            display_name,
            role,
            digest,
            active,
        }
    }

    /// Stable identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Login name.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Display name shown after login.
    pub const fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Staff role.
    pub const fn role(&self) -> StaffRole {
        self.role
    }

    /// Stored password digest.
    pub const fn digest(&self) -> &PasswordDigest {
        &self.digest
    }

    /// Whether the account may authenticate.
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Serialisable projection of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Display name shown in the UI shell.
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub display_name: String,
    /// Staff role gating management screens.
    pub role: StaffRole,
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id(),
            display_name: record.display_name().as_ref().to_owned(),
            role: record.role(),
        }
    }
}
