//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; `diesel
//! print-schema` can regenerate them from a live database.

diesel::table! {
    /// Catalogue books with their denormalised loan status.
    books (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Title shown in the catalogue.
        title -> Varchar,
        /// Author name.
        author -> Varchar,
        /// Optional ISBN-10 or ISBN-13.
        isbn -> Nullable<Varchar>,
        /// Shelf category label.
        category -> Varchar,
        /// Optional publication year.
        publication_year -> Nullable<Int4>,
        /// Loan status label: `available` or `loaned`.
        status -> Varchar,
        /// Borrowing client id; set exactly when `status` is `loaned`.
        borrowed_by -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Library patrons.
    clients (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Full name.
        full_name -> Varchar,
        /// Contact email.
        email -> Varchar,
        /// Optional contact phone.
        phone -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Staff register.
    employees (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Full name.
        full_name -> Varchar,
        /// Work email.
        email -> Varchar,
        /// Role label: `admin` or `staff`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only circulation audit log with name snapshots.
    loan_activities (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Book whose status flipped.
        book_id -> Uuid,
        /// Title snapshot taken at flip time.
        book_title -> Varchar,
        /// Borrowing client.
        client_id -> Uuid,
        /// Name snapshot taken at flip time.
        client_name -> Varchar,
        /// Direction of the flip: `loaned` or `returned`.
        action -> Varchar,
        /// When the flip was recorded.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Staff login credentials.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Display name shown after login.
        display_name -> Varchar,
        /// Role label: `admin` or `staff`.
        role -> Varchar,
        /// Hex-encoded random salt.
        password_salt -> Varchar,
        /// Hex-encoded salted SHA-256 digest.
        password_digest -> Varchar,
        /// Whether the account may authenticate.
        active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
