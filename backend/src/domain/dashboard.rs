//! Dashboard aggregation view.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::loan::LoanActivity;

/// Number of recent activities included in the dashboard summary.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Aggregate counts plus the most recent loan activity.
///
/// Counts are computed by listing and counting on each request; no derived
/// state is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// All catalogued books.
    pub total_books: u64,
    /// Books currently on the shelf.
    pub available_books: u64,
    /// Books currently out.
    pub loaned_books: u64,
    /// Registered clients.
    pub total_clients: u64,
    /// Registered employees.
    pub total_employees: u64,
    /// Most recent activity records, newest first.
    pub recent_activity: Vec<LoanActivity>,
}
