//! Domain layer: entities, validation, ports, and the services that
//! implement the driving ports over repository abstractions.

pub mod auth;
pub mod book;
pub mod catalogue_service;
pub mod circulation_service;
pub mod client;
pub mod client_directory_service;
pub mod contact;
pub mod dashboard;
pub mod dashboard_service;
pub mod employee;
pub mod employee_directory_service;
pub mod error;
pub mod loan;
pub mod login_service;
pub mod ports;
pub mod user;

pub use auth::{CredentialFailure, LoginCredentials, LoginValidationError, PasswordDigest, StaffRole};
pub use book::{
    Book, BookDraft, BookId, BookUpdate, BookValidationError, Isbn, LoanStateError, LoanStatus,
};
pub use catalogue_service::CatalogueService;
pub use circulation_service::CirculationService;
pub use client::{Client, ClientDraft, ClientId, ClientValidationError};
pub use client_directory_service::ClientDirectoryService;
pub use contact::{ContactValidationError, EmailAddress, PhoneNumber};
pub use dashboard::{DashboardSummary, RECENT_ACTIVITY_LIMIT};
pub use dashboard_service::DashboardService;
pub use employee::{Employee, EmployeeDraft, EmployeeId, EmployeeValidationError};
pub use employee_directory_service::EmployeeDirectoryService;
pub use error::{Error, ErrorCode};
pub use loan::{LoanAction, LoanActivity, LoanActivityDraft, LoanActivityValidationError};
pub use login_service::PasswordLoginService;
pub use user::{AuthenticatedUser, DisplayName, UserRecord, UserValidationError, Username};
