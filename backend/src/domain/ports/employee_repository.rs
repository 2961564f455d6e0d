//! Port abstraction for employee persistence adapters.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::employee::{Employee, EmployeeId};

/// Driven port over the `employees` collection.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// List every employee, name order.
    async fn list(&self) -> Result<Vec<Employee>, RepositoryError>;

    /// Fetch an employee by identifier.
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError>;

    /// Insert or update an employee record.
    async fn save(&self, employee: &Employee) -> Result<(), RepositoryError>;

    /// Delete an employee; returns whether a record existed.
    async fn delete(&self, id: EmployeeId) -> Result<bool, RepositoryError>;
}
