//! PostgreSQL-backed `ClientRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::client::{Client, ClientDraft, ClientId};
use crate::domain::contact::{EmailAddress, PhoneNumber};
use crate::domain::ports::{ClientRepository, RepositoryError};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{ClientRow, ClientWrite};
use super::pool::DbPool;
use super::schema::clients;

/// Diesel-backed implementation of the `ClientRepository` port.
#[derive(Clone)]
pub struct DieselClientRepository {
    pool: DbPool,
}

impl DieselClientRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_client(row: ClientRow) -> Result<Client, RepositoryError> {
    let email = EmailAddress::new(row.email).map_err(|err| corrupt_row("clients", err))?;
    let phone = row
        .phone
        .map(PhoneNumber::new)
        .transpose()
        .map_err(|err| corrupt_row("clients", err))?;

    Client::new(ClientDraft {
        id: ClientId::from_uuid(row.id),
        full_name: row.full_name,
        email,
        phone,
    })
    .map_err(|err| corrupt_row("clients", err))
}

fn client_to_write(client: &Client) -> ClientWrite<'_> {
    ClientWrite {
        id: *client.id().as_uuid(),
        full_name: client.full_name(),
        email: client.email().as_ref(),
        phone: client.phone().map(AsRef::as_ref),
    }
}

#[async_trait]
impl ClientRepository for DieselClientRepository {
    async fn list(&self) -> Result<Vec<Client>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ClientRow> = clients::table
            .select(ClientRow::as_select())
            .order(clients::full_name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_client).collect()
    }

    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ClientRow> = clients::table
            .filter(clients::id.eq(id.as_uuid()))
            .select(ClientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_client).transpose()
    }

    async fn save(&self, client: &Client) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = client_to_write(client);

        diesel::insert_into(clients::table)
            .values(&write)
            .on_conflict(clients::id)
            .do_update()
            .set(&write)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: ClientId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(clients::table.filter(clients::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
