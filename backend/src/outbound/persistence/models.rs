//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. They exist solely to satisfy Diesel's type requirements for
//! queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{books, clients, employees, loan_activities, users};

/// Row struct for reading from the books table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = books)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BookRow {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub category: String,
    pub publication_year: Option<i32>,
    pub status: String,
    pub borrowed_by: Option<Uuid>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Upsert struct for writing book records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = books)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BookWrite<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub author: &'a str,
    pub isbn: Option<&'a str>,
    pub category: &'a str,
    pub publication_year: Option<i32>,
    pub status: &'a str,
    pub borrowed_by: Option<Uuid>,
}

/// Row struct for reading from the clients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = clients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ClientRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Upsert struct for writing client records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ClientWrite<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
}

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Upsert struct for writing employee records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeWrite<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
}

/// Row struct for reading from the loan_activities table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = loan_activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LoanActivityRow {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub client_id: Uuid,
    pub client_name: String,
    pub action: String,
    pub recorded_at: DateTime<Utc>,
}

/// Insertable struct for appending audit records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = loan_activities)]
pub(crate) struct NewLoanActivityRow<'a> {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: &'a str,
    pub client_id: Uuid,
    pub client_name: &'a str,
    pub action: &'a str,
    pub recorded_at: DateTime<Utc>,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub password_salt: String,
    pub password_digest: String,
    pub active: bool,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub created_at: DateTime<Utc>,
    #[expect(dead_code, reason = "schema field for future audit trail support")]
    pub updated_at: DateTime<Utc>,
}

/// Upsert struct for writing credential records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWrite<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub password_salt: &'a str,
    pub password_digest: &'a str,
    pub active: bool,
}
