//! Dashboard API endpoint

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{error::AppResult, services::dashboard::DashboardStats, AppState};

use super::AuthenticatedUser;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.dashboard.stats(Utc::now()).await?;
    Ok(Json(stats))
}
