//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogueCommand, CatalogueQuery, CirculationCommand, CirculationQuery,
    ClientDirectoryCommand, ClientDirectoryQuery, DashboardQuery, EmployeeDirectoryCommand,
    EmployeeDirectoryQuery, LoginService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Password authentication port.
    pub login: Arc<dyn LoginService>,
    /// Book catalogue mutations.
    pub catalogue: Arc<dyn CatalogueCommand>,
    /// Book catalogue reads.
    pub catalogue_query: Arc<dyn CatalogueQuery>,
    /// Loan/return workflow.
    pub circulation: Arc<dyn CirculationCommand>,
    /// Audit log reads.
    pub circulation_query: Arc<dyn CirculationQuery>,
    /// Client register mutations.
    pub clients: Arc<dyn ClientDirectoryCommand>,
    /// Client register reads.
    pub clients_query: Arc<dyn ClientDirectoryQuery>,
    /// Staff register mutations.
    pub employees: Arc<dyn EmployeeDirectoryCommand>,
    /// Staff register reads.
    pub employees_query: Arc<dyn EmployeeDirectoryQuery>,
    /// Landing-page summary.
    pub dashboard: Arc<dyn DashboardQuery>,
}
