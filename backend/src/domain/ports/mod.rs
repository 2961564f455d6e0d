//! Hexagonal ports: driving traits consumed by the HTTP adapters and
//! driven traits implemented by persistence adapters.

mod book_repository;
mod catalogue;
mod circulation;
mod client_directory;
mod client_repository;
mod dashboard_query;
mod employee_directory;
mod employee_repository;
mod error;
mod loan_activity_repository;
mod login_service;
mod user_repository;

pub use book_repository::BookRepository;
pub use catalogue::{BookSearch, CatalogueCommand, CatalogueQuery};
pub use circulation::{CirculationCommand, CirculationQuery};
pub use client_directory::{ClientDirectoryCommand, ClientDirectoryQuery, ClientSearch};
pub use client_repository::ClientRepository;
pub use dashboard_query::DashboardQuery;
pub use employee_directory::{EmployeeDirectoryCommand, EmployeeDirectoryQuery, EmployeeSearch};
pub use employee_repository::EmployeeRepository;
pub use error::RepositoryError;
pub use loan_activity_repository::{ActivityFilter, LoanActivityRepository};
pub use login_service::LoginService;
pub use user_repository::UserRepository;
