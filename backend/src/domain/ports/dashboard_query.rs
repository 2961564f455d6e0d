//! Driving port for the landing-page summary.

use async_trait::async_trait;

use crate::domain::dashboard::DashboardSummary;
use crate::domain::error::Error;

/// Aggregates collection counts and recent circulation activity.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Compute the current summary.
    async fn summary(&self) -> Result<DashboardSummary, Error>;
}
