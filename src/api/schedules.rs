//! Maintenance schedule API endpoints

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        CalendarQuery, CompleteSchedule, CreateSchedule, MaintenanceSchedule, ScheduleDetails,
        ScheduleQuery, UpdateSchedule,
    },
    AppState,
};

use super::AuthenticatedUser;

/// List schedules with their due status
#[utoipa::path(
    get,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedules", body = Vec<ScheduleDetails>)
    )
)]
pub async fn list_schedules(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<ScheduleQuery>,
) -> AppResult<Json<Vec<ScheduleDetails>>> {
    let schedules = state.services.schedules.list(&query, Utc::now()).await?;
    Ok(Json(schedules))
}

/// Get a schedule
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 200, description = "Schedule", body = ScheduleDetails),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ScheduleDetails>> {
    let schedule = state.services.schedules.get(id, Utc::now()).await?;
    Ok(Json(schedule))
}

/// Create a schedule
#[utoipa::path(
    post,
    path = "/schedules",
    tag = "schedules",
    security(("bearer_auth" = [])),
    request_body = CreateSchedule,
    responses(
        (status = 201, description = "Schedule created", body = MaintenanceSchedule),
        (status = 422, description = "No due date can be determined", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<MaintenanceSchedule>)> {
    data.validate()?;
    let schedule = state
        .services
        .schedules
        .create(&data, Some(session.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// Update a schedule
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = UpdateSchedule,
    responses(
        (status = 200, description = "Schedule updated", body = MaintenanceSchedule)
    )
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateSchedule>,
) -> AppResult<Json<MaintenanceSchedule>> {
    data.validate()?;
    let schedule = state.services.schedules.update(id, &data).await?;
    Ok(Json(schedule))
}

/// Delete a schedule
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Schedule ID")),
    responses(
        (status = 204, description = "Schedule deleted")
    )
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.schedules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Record that maintenance was performed and roll the due date forward
#[utoipa::path(
    post,
    path = "/schedules/{id}/complete",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Schedule ID")),
    request_body = CompleteSchedule,
    responses(
        (status = 200, description = "Schedule advanced", body = MaintenanceSchedule),
        (status = 400, description = "Malformed body or completion date", body = crate::error::ErrorResponse),
        (status = 404, description = "Schedule not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Schedule has no automatic interval", body = crate::error::ErrorResponse)
    )
)]
pub async fn complete_schedule(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> AppResult<Json<MaintenanceSchedule>> {
    let completed_on = completion_date(&body, Utc::now().date_naive())?;
    let schedule = state.services.schedules.complete(id, completed_on).await?;
    Ok(Json(schedule))
}

/// Completion date from an optional JSON body: an empty body or a missing
/// `completed_on` means `today`, anything unreadable is rejected
fn completion_date(body: &[u8], today: NaiveDate) -> AppResult<NaiveDate> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(today);
    }
    let request: CompleteSchedule = serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid completion body: {}", e)))?;
    Ok(request.completed_on.unwrap_or(today))
}

/// Schedules due in a date range
#[utoipa::path(
    get,
    path = "/schedules/calendar",
    tag = "schedules",
    security(("bearer_auth" = [])),
    params(CalendarQuery),
    responses(
        (status = 200, description = "Schedules due in the range", body = Vec<ScheduleDetails>),
        (status = 400, description = "Invalid range", body = crate::error::ErrorResponse)
    )
)]
pub async fn calendar(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<CalendarQuery>,
) -> AppResult<Json<Vec<ScheduleDetails>>> {
    let schedules = state
        .services
        .schedules
        .calendar(query.start, query.end, Utc::now())
        .await?;
    Ok(Json(schedules))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_empty_body_completes_today() {
        assert_eq!(completion_date(b"", today()).unwrap(), today());
        assert_eq!(completion_date(b"  \n", today()).unwrap(), today());
        assert_eq!(completion_date(b"{}", today()).unwrap(), today());
    }

    #[test]
    fn test_explicit_completion_date_is_used() {
        let date = completion_date(br#"{"completed_on":"2024-03-15"}"#, today()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_malformed_completion_date_is_rejected() {
        let err = completion_date(br#"{"completed_on":"2024-13-45"}"#, today()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = completion_date(b"completed_on=2024-03-15", today()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
