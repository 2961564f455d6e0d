//! PostgreSQL-backed `EmployeeRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::auth::StaffRole;
use crate::domain::contact::EmailAddress;
use crate::domain::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::domain::ports::{EmployeeRepository, RepositoryError};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{EmployeeRow, EmployeeWrite};
use super::pool::DbPool;
use super::schema::employees;

/// Diesel-backed implementation of the `EmployeeRepository` port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_employee(row: EmployeeRow) -> Result<Employee, RepositoryError> {
    let email = EmailAddress::new(row.email).map_err(|err| corrupt_row("employees", err))?;
    let role = StaffRole::parse(&row.role)
        .ok_or_else(|| corrupt_row("employees", format!("unrecognised role {:?}", row.role)))?;

    Employee::new(EmployeeDraft {
        id: EmployeeId::from_uuid(row.id),
        full_name: row.full_name,
        email,
        role,
    })
    .map_err(|err| corrupt_row("employees", err))
}

fn employee_to_write(employee: &Employee) -> EmployeeWrite<'_> {
    EmployeeWrite {
        id: *employee.id().as_uuid(),
        full_name: employee.full_name(),
        email: employee.email().as_ref(),
        role: employee.role().as_str(),
    }
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EmployeeRow> = employees::table
            .select(EmployeeRow::as_select())
            .order(employees::full_name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_employee).collect()
    }

    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EmployeeRow> = employees::table
            .filter(employees::id.eq(id.as_uuid()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_employee).transpose()
    }

    async fn save(&self, employee: &Employee) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = employee_to_write(employee);

        diesel::insert_into(employees::table)
            .values(&write)
            .on_conflict(employees::id)
            .do_update()
            .set(&write)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(employees::table.filter(employees::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
