//! Due-date classification and rollover

use chrono::{DateTime, Days, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{enums::Frequency, schedule::MaintenanceSchedule};

/// Default width of the "due soon" window
pub const DEFAULT_DUE_SOON_DAYS: i64 = 30;

/// Urgency of a schedule (or a warranty) relative to an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueSoon,
    Scheduled,
}

impl DueStatus {
    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Overdue => "Overdue",
            DueStatus::DueSoon => "Due Soon",
            DueStatus::Scheduled => "Scheduled",
        }
    }
}

/// Rejection raised when a schedule cannot produce a due date
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSchedule {
    #[error("next due date is required when no last-performed date is given")]
    MissingNextDue,

    #[error("unrecognized frequency: {0}")]
    UnknownFrequency(String),

    #[error("frequency '{0}' has no automatic interval; set next_due explicitly")]
    NoAutomaticInterval(Frequency),

    #[error("frequency interval must be a positive number of days, got {0}")]
    InvalidInterval(i32),

    #[error("next due date is out of the supported calendar range")]
    OutOfRange,
}

/// Result of recording a completed maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Completion {
    pub last_performed: NaiveDate,
    pub next_due: NaiveDate,
}

/// Calendar step of a frequency
enum Cadence {
    Days(u64),
    Months(u32),
}

fn cadence(frequency: Frequency) -> Option<Cadence> {
    match frequency {
        Frequency::Daily => Some(Cadence::Days(1)),
        Frequency::Weekly => Some(Cadence::Days(7)),
        Frequency::Monthly => Some(Cadence::Months(1)),
        Frequency::Quarterly => Some(Cadence::Months(3)),
        Frequency::SemiAnnual => Some(Cadence::Months(6)),
        Frequency::Annual => Some(Cadence::Months(12)),
        Frequency::AsNeeded => None,
    }
}

/// A calendar date is due at midnight UTC of that day
fn due_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Classify a due date with the default 30-day window
pub fn classify(next_due: NaiveDate, now: DateTime<Utc>) -> DueStatus {
    classify_within(next_due, now, Duration::days(DEFAULT_DUE_SOON_DAYS))
}

/// Classify a due date: overdue at or before `now`, due soon up to and
/// including `now + window`, scheduled beyond that
pub fn classify_within(next_due: NaiveDate, now: DateTime<Utc>, window: Duration) -> DueStatus {
    let due = due_instant(next_due);
    if due <= now {
        DueStatus::Overdue
    } else if due <= now + window {
        DueStatus::DueSoon
    } else {
        DueStatus::Scheduled
    }
}

/// Parse a stored frequency label
pub fn parse_frequency(label: &str) -> Result<Frequency, InvalidSchedule> {
    label
        .parse()
        .map_err(|_| InvalidSchedule::UnknownFrequency(label.to_string()))
}

/// Compute the due date that follows `from`.
///
/// An explicit interval in days takes precedence over the frequency's
/// cadence. Month arithmetic clamps to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn next_due_after(
    frequency: Frequency,
    interval_days: Option<i32>,
    from: NaiveDate,
) -> Result<NaiveDate, InvalidSchedule> {
    let step = match interval_days {
        Some(days) if days <= 0 => return Err(InvalidSchedule::InvalidInterval(days)),
        Some(days) => Cadence::Days(days as u64),
        None => cadence(frequency).ok_or(InvalidSchedule::NoAutomaticInterval(frequency))?,
    };

    let next = match step {
        Cadence::Days(n) => from.checked_add_days(Days::new(n)),
        Cadence::Months(n) => from.checked_add_months(Months::new(n)),
    };
    next.ok_or(InvalidSchedule::OutOfRange)
}

/// Roll a schedule forward after maintenance was performed on `completed_on`.
///
/// The schedule itself is not modified; callers persist the returned
/// completion.
pub fn advance(
    schedule: &MaintenanceSchedule,
    completed_on: NaiveDate,
) -> Result<Completion, InvalidSchedule> {
    let next_due = next_due_after(schedule.frequency, schedule.frequency_interval, completed_on)?;
    Ok(Completion {
        last_performed: completed_on,
        next_due,
    })
}

/// Determine the next due date of a new schedule: an explicit date wins,
/// otherwise it is derived from the last-performed date.
pub fn resolve_next_due(
    frequency: Frequency,
    interval_days: Option<i32>,
    last_performed: Option<NaiveDate>,
    next_due: Option<NaiveDate>,
) -> Result<NaiveDate, InvalidSchedule> {
    match (next_due, last_performed) {
        (Some(date), _) => Ok(date),
        (None, Some(last)) => next_due_after(frequency, interval_days, last),
        (None, None) => Err(InvalidSchedule::MissingNextDue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn schedule(frequency: Frequency, interval: Option<i32>) -> MaintenanceSchedule {
        MaintenanceSchedule {
            schedule_id: Uuid::new_v4(),
            equipment_id: Uuid::new_v4(),
            maintenance_type: "Tube calibration".to_string(),
            frequency,
            frequency_interval: interval,
            last_performed: None,
            next_due: date(2024, 1, 1),
            estimated_hours: None,
            required_parts: None,
            procedure_details: None,
            is_active: true,
            created_date: Utc::now(),
            created_by: None,
        }
    }

    #[test]
    fn test_classify_overdue() {
        let now = noon(2024, 6, 1);
        assert_eq!(classify(date(2024, 5, 1), now), DueStatus::Overdue);
        // Due today means midnight has already passed
        assert_eq!(classify(date(2024, 6, 1), now), DueStatus::Overdue);
    }

    #[test]
    fn test_classify_due_soon_window() {
        let now = noon(2024, 6, 1);
        assert_eq!(classify(date(2024, 6, 2), now), DueStatus::DueSoon);
        assert_eq!(classify(date(2024, 7, 1), now), DueStatus::DueSoon);
        assert_eq!(classify(date(2024, 7, 2), now), DueStatus::Scheduled);
    }

    #[test]
    fn test_classify_boundaries_at_midnight() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        // next_due == now
        assert_eq!(classify(date(2024, 6, 1), now), DueStatus::Overdue);
        // next_due == now + 30 days
        assert_eq!(classify(date(2024, 7, 1), now), DueStatus::DueSoon);
        assert_eq!(classify(date(2024, 7, 2), now), DueStatus::Scheduled);
    }

    #[test]
    fn test_classify_custom_window() {
        let now = noon(2024, 6, 1);
        let week = Duration::days(7);
        assert_eq!(classify_within(date(2024, 6, 8), now, week), DueStatus::DueSoon);
        assert_eq!(classify_within(date(2024, 6, 9), now, week), DueStatus::Scheduled);
    }

    #[test]
    fn test_classify_is_pure() {
        let now = noon(2024, 6, 1);
        let due = date(2024, 6, 15);
        assert_eq!(classify(due, now), classify(due, now));
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        let leap = advance(&schedule(Frequency::Monthly, None), date(2024, 1, 31)).unwrap();
        assert_eq!(leap.next_due, date(2024, 2, 29));
        assert_eq!(leap.last_performed, date(2024, 1, 31));

        let common = advance(&schedule(Frequency::Monthly, None), date(2023, 1, 31)).unwrap();
        assert_eq!(common.next_due, date(2023, 2, 28));
    }

    #[test]
    fn test_annual_from_leap_day() {
        let c = advance(&schedule(Frequency::Annual, None), date(2024, 2, 29)).unwrap();
        assert_eq!(c.next_due, date(2025, 2, 28));
    }

    #[test]
    fn test_calendar_cadences() {
        let from = date(2024, 8, 31);
        let cases = [
            (Frequency::Daily, date(2024, 9, 1)),
            (Frequency::Weekly, date(2024, 9, 7)),
            (Frequency::Monthly, date(2024, 9, 30)),
            (Frequency::Quarterly, date(2024, 11, 30)),
            (Frequency::SemiAnnual, date(2025, 2, 28)),
            (Frequency::Annual, date(2025, 8, 31)),
        ];
        for (frequency, expected) in cases {
            let c = advance(&schedule(frequency, None), from).unwrap();
            assert_eq!(c.next_due, expected, "{}", frequency);
        }
    }

    #[test]
    fn test_daily_crosses_year_end() {
        let c = advance(&schedule(Frequency::Daily, None), date(2024, 12, 31)).unwrap();
        assert_eq!(c.next_due, date(2025, 1, 1));
    }

    #[test]
    fn test_as_needed_has_no_automatic_advance() {
        let s = schedule(Frequency::AsNeeded, None);
        let err = advance(&s, date(2024, 3, 1)).unwrap_err();
        assert_eq!(err, InvalidSchedule::NoAutomaticInterval(Frequency::AsNeeded));
        assert_eq!(s.next_due, date(2024, 1, 1));
    }

    #[test]
    fn test_explicit_interval_overrides_cadence() {
        let c = advance(&schedule(Frequency::Monthly, Some(45)), date(2024, 1, 1)).unwrap();
        assert_eq!(c.next_due, date(2024, 2, 15));

        let c = advance(&schedule(Frequency::AsNeeded, Some(10)), date(2024, 1, 1)).unwrap();
        assert_eq!(c.next_due, date(2024, 1, 11));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let err = advance(&schedule(Frequency::Weekly, Some(0)), date(2024, 1, 1)).unwrap_err();
        assert_eq!(err, InvalidSchedule::InvalidInterval(0));
        let err = advance(&schedule(Frequency::Weekly, Some(-3)), date(2024, 1, 1)).unwrap_err();
        assert_eq!(err, InvalidSchedule::InvalidInterval(-3));
    }

    #[test]
    fn test_out_of_range() {
        let err = next_due_after(Frequency::Annual, None, NaiveDate::MAX).unwrap_err();
        assert_eq!(err, InvalidSchedule::OutOfRange);
    }

    #[test]
    fn test_resolve_next_due() {
        let explicit = resolve_next_due(
            Frequency::Monthly,
            None,
            Some(date(2024, 1, 31)),
            Some(date(2024, 3, 15)),
        );
        assert_eq!(explicit, Ok(date(2024, 3, 15)));

        let derived = resolve_next_due(Frequency::Quarterly, None, Some(date(2024, 1, 31)), None);
        assert_eq!(derived, Ok(date(2024, 4, 30)));

        let missing = resolve_next_due(Frequency::Monthly, None, None, None);
        assert_eq!(missing, Err(InvalidSchedule::MissingNextDue));

        let as_needed = resolve_next_due(Frequency::AsNeeded, None, Some(date(2024, 1, 1)), None);
        assert_eq!(
            as_needed,
            Err(InvalidSchedule::NoAutomaticInterval(Frequency::AsNeeded))
        );
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_frequency("Semi-Annual"), Ok(Frequency::SemiAnnual));
        assert_eq!(
            parse_frequency("Biweekly"),
            Err(InvalidSchedule::UnknownFrequency("Biweekly".to_string()))
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(DueStatus::Overdue.label(), "Overdue");
        assert_eq!(DueStatus::DueSoon.label(), "Due Soon");
        assert_eq!(DueStatus::Scheduled.label(), "Scheduled");
    }
}
