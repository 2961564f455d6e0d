//! Driving ports for the staff register.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::domain::error::Error;

/// Free-text predicate over employee name and email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeSearch {
    /// Case-insensitive substring; `None` matches everyone.
    pub query: Option<String>,
}

impl EmployeeSearch {
    /// A search matching every employee.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A search for a specific term; blank input matches everyone.
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

    /// Whether `employee` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, employee: &Employee) -> bool {
        self.query
            .as_deref()
            .is_none_or(|term| employee.matches_search(term))
    }
}

/// Mutating staff-register operations.
#[async_trait]
pub trait EmployeeDirectoryCommand: Send + Sync {
    /// Register a new employee.
    async fn add_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Replace an employee's details.
    async fn update_employee(
        &self,
        id: EmployeeId,
        draft: EmployeeDraft,
    ) -> Result<Employee, Error>;

    /// Delete an employee record.
    async fn remove_employee(&self, id: EmployeeId) -> Result<(), Error>;
}

/// Read-only staff-register operations.
#[async_trait]
pub trait EmployeeDirectoryQuery: Send + Sync {
    /// Page through employees matching `search`, ordered by name.
    async fn list_employees(
        &self,
        search: EmployeeSearch,
        page: PageRequest,
    ) -> Result<Page<Employee>, Error>;

    /// Fetch one employee or `NotFound`.
    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, Error>;
}
