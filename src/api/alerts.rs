//! Alerts API endpoint

use axum::{extract::State, Json};
use chrono::Utc;

use crate::{error::AppResult, services::alerts::Alert, AppState};

use super::AuthenticatedUser;

/// Overdue maintenance and expiring warranties
#[utoipa::path(
    get,
    path = "/alerts",
    tag = "alerts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active alerts, overdue maintenance first", body = Vec<Alert>)
    )
)]
pub async fn list_alerts(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
) -> AppResult<Json<Vec<Alert>>> {
    let alerts = state.services.alerts.list(Utc::now()).await?;
    Ok(Json(alerts))
}
