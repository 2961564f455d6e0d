//! PostgreSQL-backed `LoanActivityRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::book::BookId;
use crate::domain::client::ClientId;
use crate::domain::loan::{LoanAction, LoanActivity, LoanActivityDraft};
use crate::domain::ports::{ActivityFilter, LoanActivityRepository, RepositoryError};

use super::error_mapping::{corrupt_row, map_diesel_error, map_pool_error};
use super::models::{LoanActivityRow, NewLoanActivityRow};
use super::pool::DbPool;
use super::schema::loan_activities;

/// Diesel-backed implementation of the `LoanActivityRepository` port.
#[derive(Clone)]
pub struct DieselLoanActivityRepository {
    pool: DbPool,
}

impl DieselLoanActivityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_activity(row: LoanActivityRow) -> Result<LoanActivity, RepositoryError> {
    let action = LoanAction::parse(&row.action).ok_or_else(|| {
        corrupt_row(
            "loan_activities",
            format!("unrecognised action {:?}", row.action),
        )
    })?;

    LoanActivity::from_parts(LoanActivityDraft {
        id: row.id,
        book_id: BookId::from_uuid(row.book_id),
        book_title: row.book_title,
        client_id: ClientId::from_uuid(row.client_id),
        client_name: row.client_name,
        action,
        recorded_at: row.recorded_at,
    })
    .map_err(|err| corrupt_row("loan_activities", err))
}

#[async_trait]
impl LoanActivityRepository for DieselLoanActivityRepository {
    async fn append(&self, activity: &LoanActivity) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewLoanActivityRow {
            id: activity.id(),
            book_id: *activity.book_id().as_uuid(),
            book_title: activity.book_title(),
            client_id: *activity.client_id().as_uuid(),
            client_name: activity.client_name(),
            action: activity.action().as_str(),
            recorded_at: activity.recorded_at(),
        };

        diesel::insert_into(loan_activities::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list(&self, filter: ActivityFilter) -> Result<Vec<LoanActivity>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = loan_activities::table
            .select(LoanActivityRow::as_select())
            .order(loan_activities::recorded_at.desc())
            .into_boxed();
        if let Some(book_id) = filter.book_id {
            query = query.filter(loan_activities::book_id.eq(*book_id.as_uuid()));
        }
        if let Some(client_id) = filter.client_id {
            query = query.filter(loan_activities::client_id.eq(*client_id.as_uuid()));
        }

        let rows: Vec<LoanActivityRow> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_activity).collect()
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<LoanActivity>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit)
            .map_err(|_| RepositoryError::query("recent-activity limit out of range"))?;

        let rows: Vec<LoanActivityRow> = loan_activities::table
            .select(LoanActivityRow::as_select())
            .order(loan_activities::recorded_at.desc())
            .limit(limit)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_activity).collect()
    }

    async fn delete_for_book(&self, book_id: BookId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            loan_activities::table.filter(loan_activities::book_id.eq(book_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted as u64)
    }

    async fn delete_for_client(&self, client_id: ClientId) -> Result<u64, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            loan_activities::table.filter(loan_activities::client_id.eq(client_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(action: &str) -> LoanActivityRow {
        LoanActivityRow {
            id: Uuid::new_v4(),
            book_id: Uuid::new_v4(),
            book_title: "Kindred".to_owned(),
            client_id: Uuid::new_v4(),
            client_name: "Iris Chang".to_owned(),
            action: action.to_owned(),
            recorded_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("loaned", LoanAction::Loaned)]
    #[case("returned", LoanAction::Returned)]
    fn actions_round_trip(#[case] label: &str, #[case] expected: LoanAction) {
        let activity = row_to_activity(row(label)).expect("converted");
        assert_eq!(activity.action(), expected);
    }

    #[rstest]
    fn unknown_action_is_rejected() {
        let error = row_to_activity(row("renewed")).expect_err("rejected");
        assert!(matches!(error, RepositoryError::Query { .. }));
    }
}
