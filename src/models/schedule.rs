//! Maintenance schedule models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::Frequency;
use crate::{
    error::{AppError, AppResult},
    maintenance::{self, DueStatus, InvalidSchedule},
};

/// Raw `schedules` row, optionally joined with the equipment name.
///
/// The frequency label is parsed when converting into
/// [`MaintenanceSchedule`]; a stored label that no longer parses is a
/// server-side fault, not a client error.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    schedule_id: Uuid,
    equipment_id: Uuid,
    maintenance_type: String,
    frequency: String,
    frequency_interval: Option<i32>,
    last_performed: Option<NaiveDate>,
    next_due: NaiveDate,
    estimated_hours: Option<Decimal>,
    required_parts: Option<String>,
    procedure_details: Option<String>,
    is_active: bool,
    created_date: DateTime<Utc>,
    created_by: Option<Uuid>,
    #[sqlx(default)]
    equipment_name: Option<String>,
}

impl ScheduleRow {
    /// Convert a stored row; an unreadable row is logged and reported as an
    /// internal error
    pub fn into_schedule(self) -> AppResult<MaintenanceSchedule> {
        let id = self.schedule_id;
        MaintenanceSchedule::try_from(self).map_err(|e| {
            tracing::error!(schedule_id = %id, error = %e, "Stored schedule is unreadable");
            AppError::Internal(format!("Schedule {} has invalid stored data: {}", id, e))
        })
    }

    /// Split into the schedule and the joined equipment name
    pub fn into_parts(mut self) -> AppResult<(MaintenanceSchedule, Option<String>)> {
        let equipment_name = self.equipment_name.take();
        Ok((self.into_schedule()?, equipment_name))
    }
}

impl TryFrom<ScheduleRow> for MaintenanceSchedule {
    type Error = InvalidSchedule;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        Ok(MaintenanceSchedule {
            schedule_id: row.schedule_id,
            equipment_id: row.equipment_id,
            maintenance_type: row.maintenance_type,
            frequency: maintenance::parse_frequency(&row.frequency)?,
            frequency_interval: row.frequency_interval,
            last_performed: row.last_performed,
            next_due: row.next_due,
            estimated_hours: row.estimated_hours,
            required_parts: row.required_parts,
            procedure_details: row.procedure_details,
            is_active: row.is_active,
            created_date: row.created_date,
            created_by: row.created_by,
        })
    }
}

/// A recurring maintenance obligation tied to one piece of equipment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceSchedule {
    pub schedule_id: Uuid,
    pub equipment_id: Uuid,
    /// Free-text maintenance type (e.g. "Preventive inspection")
    pub maintenance_type: String,
    pub frequency: Frequency,
    /// Explicit interval in days, overrides the frequency cadence
    pub frequency_interval: Option<i32>,
    pub last_performed: Option<NaiveDate>,
    pub next_due: NaiveDate,
    pub estimated_hours: Option<Decimal>,
    pub required_parts: Option<String>,
    pub procedure_details: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// Schedule with its equipment name and current urgency
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleDetails {
    #[serde(flatten)]
    pub schedule: MaintenanceSchedule,
    pub equipment_name: Option<String>,
    pub status: DueStatus,
}

/// Create schedule request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSchedule {
    pub equipment_id: Uuid,
    #[validate(length(min = 1, max = 255, message = "Maintenance type is required"))]
    pub maintenance_type: String,
    pub frequency: Frequency,
    #[validate(range(min = 1, message = "Interval must be at least one day"))]
    pub frequency_interval: Option<i32>,
    /// Last performed date (YYYY-MM-DD)
    pub last_performed: Option<NaiveDate>,
    /// Next due date (YYYY-MM-DD); derived from last_performed when omitted
    pub next_due: Option<NaiveDate>,
    pub estimated_hours: Option<Decimal>,
    pub required_parts: Option<String>,
    pub procedure_details: Option<String>,
    pub is_active: Option<bool>,
}

/// Update schedule request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSchedule {
    pub equipment_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub maintenance_type: Option<String>,
    pub frequency: Option<Frequency>,
    #[validate(range(min = 1, message = "Interval must be at least one day"))]
    pub frequency_interval: Option<i32>,
    pub last_performed: Option<NaiveDate>,
    pub next_due: Option<NaiveDate>,
    pub estimated_hours: Option<Decimal>,
    pub required_parts: Option<String>,
    pub procedure_details: Option<String>,
    pub is_active: Option<bool>,
}

/// Record that maintenance was performed
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CompleteSchedule {
    /// Completion date (YYYY-MM-DD), defaults to today
    pub completed_on: Option<NaiveDate>,
}

/// Query parameters for schedule listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct ScheduleQuery {
    pub equipment_id: Option<Uuid>,
    /// Only active (true) or inactive (false) schedules
    pub active: Option<bool>,
    /// Only schedules due on or before this date
    pub due_before: Option<NaiveDate>,
    /// Only schedules with this urgency
    pub status: Option<DueStatus>,
}

/// Query parameters for the maintenance calendar
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct CalendarQuery {
    /// First day of the range (YYYY-MM-DD)
    pub start: NaiveDate,
    /// Last day of the range (YYYY-MM-DD)
    pub end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};

    fn row(frequency: &str) -> ScheduleRow {
        ScheduleRow {
            schedule_id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            maintenance_type: "Tube calibration".to_string(),
            frequency: frequency.to_string(),
            frequency_interval: None,
            last_performed: None,
            next_due: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            estimated_hours: None,
            required_parts: None,
            procedure_details: None,
            is_active: true,
            created_date: Utc::now(),
            created_by: None,
            equipment_name: Some("CT Scanner".to_string()),
        }
    }

    #[test]
    fn test_row_with_known_frequency_converts() {
        let (schedule, name) = row("Semi-Annual").into_parts().unwrap();
        assert_eq!(schedule.frequency, Frequency::SemiAnnual);
        assert_eq!(name.as_deref(), Some("CT Scanner"));
    }

    #[test]
    fn test_row_with_unknown_frequency_is_server_error() {
        let err = row("Biweekly").into_parts().unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
