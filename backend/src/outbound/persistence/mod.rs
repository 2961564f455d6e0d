//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! Diesel with async support through `diesel-async` and `bb8` pooling.
//!
//! The adapters are thin translators: Diesel row structs (`models`) and
//! table definitions (`schema`) stay internal, every database failure maps
//! to `RepositoryError`, and no business logic lives here.

mod diesel_book_repository;
mod diesel_client_repository;
mod diesel_employee_repository;
mod diesel_loan_activity_repository;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_client_repository::DieselClientRepository;
pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_loan_activity_repository::DieselLoanActivityRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
