//! Report API endpoints, as JSON or CSV downloads

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::{
    error::AppResult,
    models::report::{
        MaintenanceHistoryQuery, MaintenanceHistoryReport, PartsUsageQuery, PartsUsageReport,
        ReportFormat,
    },
    services::reports::{maintenance_history_csv, parts_usage_csv},
    AppState,
};

use super::AuthenticatedUser;

fn csv_attachment(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// Maintenance performed in a date range
#[utoipa::path(
    get,
    path = "/reports/maintenance-history",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(MaintenanceHistoryQuery),
    responses(
        (status = 200, description = "Maintenance history", content(
            ("application/json" = MaintenanceHistoryReport),
            ("text/csv" = String)
        )),
        (status = 400, description = "Invalid range", body = crate::error::ErrorResponse)
    )
)]
pub async fn maintenance_history(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<MaintenanceHistoryQuery>,
) -> AppResult<Response> {
    let report = state
        .services
        .reports
        .maintenance_history(&query, Utc::now())
        .await?;
    match query.format {
        ReportFormat::Json => Ok(Json(report).into_response()),
        ReportFormat::Csv => {
            let body = maintenance_history_csv(&report.records)?;
            Ok(csv_attachment("maintenance-history.csv", body))
        }
    }
}

/// Parts inventory with stock value
#[utoipa::path(
    get,
    path = "/reports/parts-usage",
    tag = "reports",
    security(("bearer_auth" = [])),
    params(PartsUsageQuery),
    responses(
        (status = 200, description = "Parts usage", content(
            ("application/json" = PartsUsageReport),
            ("text/csv" = String)
        ))
    )
)]
pub async fn parts_usage(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<PartsUsageQuery>,
) -> AppResult<Response> {
    let report = state.services.reports.parts_usage(&query).await?;
    match query.format {
        ReportFormat::Json => Ok(Json(report).into_response()),
        ReportFormat::Csv => {
            let body = parts_usage_csv(&report.parts)?;
            Ok(csv_attachment("parts-usage.csv", body))
        }
    }
}
