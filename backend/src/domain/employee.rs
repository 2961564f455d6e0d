//! Employee data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::auth::StaffRole;
use crate::domain::contact::{ContactValidationError, EmailAddress};

/// Maximum length for an employee's full name.
pub const EMPLOYEE_NAME_MAX: usize = 120;

/// Validation errors raised by the employee constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// The full name was empty after trimming.
    EmptyName,
    /// The full name exceeded [`EMPLOYEE_NAME_MAX`] characters.
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// A contact field failed validation.
    Contact(ContactValidationError),
    /// The role label was not `admin` or `staff`.
    UnknownRole,
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::Contact(err) => write!(f, "{err}"),
            Self::UnknownRole => write!(f, "role must be either admin or staff"),
        }
    }
}

impl std::error::Error for EmployeeValidationError {}

impl From<ContactValidationError> for EmployeeValidationError {
    fn from(value: ContactValidationError) -> Self {
        Self::Contact(value)
    }
}

/// Stable employee identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
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

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated employee fields accepted by [`Employee::new`].
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    /// Stable identifier.
    pub id: EmployeeId,
    /// Full name.
    pub full_name: String,
    /// Work email.
    pub email: EmailAddress,
    /// Staff role.
    pub role: StaffRole,
}

/// Library employee record.
///
/// ## Invariants
/// - `full_name` is non-empty once trimmed and at most
///   [`EMPLOYEE_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "EmployeeDto", into = "EmployeeDto")]
pub struct Employee {
    #[schema(value_type = String, example = "b3d9a1f0-91e2-4d55-8a7e-2f6a4c1d9e01")]
    id: EmployeeId,
    #[schema(example = "Sam Okafor")]
    full_name: String,
    #[schema(value_type = String, example = "sam@library.example")]
    email: EmailAddress,
    #[schema(value_type = String, example = "staff")]
    role: StaffRole,
}

impl Employee {
    /// Validate a draft and construct an [`Employee`].
    pub fn new(draft: EmployeeDraft) -> Result<Self, EmployeeValidationError> {
        let EmployeeDraft {
            id,
            full_name,
            email,
            role,
        } = draft;
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        if trimmed.chars().count() > EMPLOYEE_NAME_MAX {
            return Err(EmployeeValidationError::NameTooLong {
                max: EMPLOYEE_NAME_MAX,
            });
        }
        Ok(Self {
            id,
            full_name: trimmed.to_owned(),
            email,
            role,
        })
    }

    /// Stable identifier.
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Full name.
    pub fn full_name(&self) -> &str {
        self.full_name.as_str()
    }

    /// Work email.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Staff role.
    pub const fn role(&self) -> StaffRole {
        self.role
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
struct EmployeeDto {
    id: Uuid,
    full_name: String,
    email: String,
    role: String,
}

impl From<Employee> for EmployeeDto {
    fn from(value: Employee) -> Self {
        let Employee {
            id,
            full_name,
            email,
            role,
        } = value;
        Self {
            id: *id.as_uuid(),
            full_name,
            email: email.into(),
            role: role.as_str().to_owned(),
        }
    }
}

impl TryFrom<EmployeeDto> for Employee {
    type Error = EmployeeValidationError;

    fn try_from(value: EmployeeDto) -> Result<Self, Self::Error> {
        let role =
            StaffRole::parse(&value.role).ok_or(EmployeeValidationError::UnknownRole)?;
        Employee::new(EmployeeDraft {
            id: EmployeeId::from_uuid(value.id),
            full_name: value.full_name,
            email: EmailAddress::new(value.email)?,
            role,
        })
    }
}
