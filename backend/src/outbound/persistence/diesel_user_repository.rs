//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::auth::{PasswordDigest, StaffRole};
use crate::domain::ports::{RepositoryError, UserRepository};
use crate::domain::user::{DisplayName, UserRecord, Username};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{UserRow, UserWrite};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<UserRecord, RepositoryError> {
    let username = Username::new(row.username).map_err(|err| corrupt_row("users", err))?;
    let display_name =
        DisplayName::new(row.display_name).map_err(|err| corrupt_row("users", err))?;
    let role = StaffRole::parse(&row.role)
        .ok_or_else(|| corrupt_row("users", format!("unrecognised role {:?}", row.role)))?;

    Ok(UserRecord::new(
        row.id,
        username,
        display_name,
        role,
        PasswordDigest::from_parts(row.password_salt, row.password_digest),
        row.active,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn upsert(&self, user: &UserRecord) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = UserWrite {
            id: user.id(),
            username: user.username().as_ref(),
            display_name: user.display_name().as_ref(),
            role: user.role().as_str(),
            password_salt: user.digest().salt(),
            password_digest: user.digest().digest(),
            active: user.is_active(),
        };

        diesel::insert_into(users::table)
            .values(&write)
            .on_conflict(users::username)
            .do_update()
            .set(&write)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(role: &str) -> UserRow {
        let digest = PasswordDigest::generate("secret");
        UserRow {
            id: Uuid::new_v4(),
            username: "astrid".to_owned(),
            display_name: "Astrid Berg".to_owned(),
            role: role.to_owned(),
            password_salt: digest.salt().to_owned(),
            password_digest: digest.digest().to_owned(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn valid_row_converts_and_verifies() {
        let record = row_to_user(row("admin")).expect("converted");
        assert_eq!(record.role(), StaffRole::Admin);
        assert!(record.digest().verify("secret"));
        assert!(!record.digest().verify("wrong"));
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let error = row_to_user(row("root")).expect_err("rejected");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }
}
