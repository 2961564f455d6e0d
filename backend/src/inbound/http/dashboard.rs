//! Dashboard summary API handler.

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::dashboard::DashboardSummary;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Fetch collection counts and the most recent loan activity.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Aggregated collection summary", body = DashboardSummary),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboardSummary"
)]
#[get("/dashboard")]
pub async fn summary(
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardSummary>> {
    session.require_user()?;
    Ok(web::Json(state.dashboard.summary().await?))
}
