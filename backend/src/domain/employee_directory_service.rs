//! Staff register domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest, paginate};
use serde_json::json;

use crate::domain::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeValidationError};
use crate::domain::error::Error;
use crate::domain::ports::{
    EmployeeDirectoryCommand, EmployeeDirectoryQuery, EmployeeRepository, EmployeeSearch,
};

/// Staff register service implementing the driving ports.
#[derive(Clone)]
pub struct EmployeeDirectoryService<E> {
    employees: Arc<E>,
}

impl<E> EmployeeDirectoryService<E> {
    /// Create a new service over the given repository.
    pub fn new(employees: Arc<E>) -> Self {
        Self { employees }
    }
}

fn validation_error(error: &EmployeeValidationError) -> Error {
    Error::invalid_request("invalid employee payload").with_details(json!({
        "reason": error.to_string(),
    }))
}

impl<E> EmployeeDirectoryService<E>
where
    E: EmployeeRepository,
{
    async fn require_employee(&self, id: EmployeeId) -> Result<Employee, Error> {
        self.employees
            .find_by_id(id)
            .await
            .map_err(|err| err.into_domain("employee repository"))?
            .ok_or_else(|| Error::not_found("employee not found"))
    }
}

#[async_trait]
impl<E> EmployeeDirectoryCommand for EmployeeDirectoryService<E>
where
    E: EmployeeRepository,
{
    async fn add_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error> {
        let employee = Employee::new(draft).map_err(|err| validation_error(&err))?;
        self.employees
            .save(&employee)
            .await
            .map_err(|err| err.into_domain("employee repository"))?;
        Ok(employee)
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        draft: EmployeeDraft,
    ) -> Result<Employee, Error> {
        self.require_employee(id).await?;
        let employee = Employee::new(EmployeeDraft { id, ..draft })
            .map_err(|err| validation_error(&err))?;
        self.employees
            .save(&employee)
            .await
            .map_err(|err| err.into_domain("employee repository"))?;
        Ok(employee)
    }

    async fn remove_employee(&self, id: EmployeeId) -> Result<(), Error> {
        let removed = self
            .employees
            .delete(id)
            .await
            .map_err(|err| err.into_domain("employee repository"))?;
        if !removed {
            return Err(Error::not_found("employee not found"));
        }
        Ok(())
    }
}

#[async_trait]
impl<E> EmployeeDirectoryQuery for EmployeeDirectoryService<E>
where
    E: EmployeeRepository,
{
    async fn list_employees(
        &self,
        search: EmployeeSearch,
        page: PageRequest,
    ) -> Result<Page<Employee>, Error> {
        let mut employees = self
            .employees
            .list()
            .await
            .map_err(|err| err.into_domain("employee repository"))?;
        employees.retain(|employee| search.matches(employee));
        employees.sort_by(|a, b| {
            a.full_name()
                .to_lowercase()
                .cmp(&b.full_name().to_lowercase())
        });
        paginate(employees, &page)
            .map_err(|_| Error::invalid_request("cursor offset out of range"))
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Employee, Error> {
        self.require_employee(id).await
    }
}
