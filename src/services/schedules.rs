//! Maintenance schedules service

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    config::MAX_DUE_SOON_DAYS,
    error::{AppError, AppResult},
    maintenance::{self, DueStatus},
    models::schedule::{
        CreateSchedule, MaintenanceSchedule, ScheduleDetails, ScheduleQuery, UpdateSchedule,
    },
    repository::schedules::{ScheduleListing, ScheduleStore},
};

#[derive(Clone)]
pub struct SchedulesService {
    store: Arc<dyn ScheduleStore>,
    due_soon: Duration,
}

impl SchedulesService {
    /// `due_soon_days` is clamped to the range `AppConfig::validate` accepts
    pub fn new(store: Arc<dyn ScheduleStore>, due_soon_days: i64) -> Self {
        Self {
            store,
            due_soon: Duration::days(due_soon_days.clamp(1, MAX_DUE_SOON_DAYS)),
        }
    }

    /// Width of the "due soon" window
    pub fn due_soon_window(&self) -> Duration {
        self.due_soon
    }

    pub fn classify(&self, next_due: NaiveDate, now: DateTime<Utc>) -> DueStatus {
        maintenance::classify_within(next_due, now, self.due_soon)
    }

    fn details(&self, (schedule, equipment_name): ScheduleListing, now: DateTime<Utc>) -> ScheduleDetails {
        let status = self.classify(schedule.next_due, now);
        ScheduleDetails {
            schedule,
            equipment_name,
            status,
        }
    }

    /// List schedules with their urgency at `now`
    pub async fn list(&self, query: &ScheduleQuery, now: DateTime<Utc>) -> AppResult<Vec<ScheduleDetails>> {
        let listings = self.store.list(query).await?;
        Ok(listings
            .into_iter()
            .map(|listing| self.details(listing, now))
            .filter(|details| query.status.map_or(true, |status| details.status == status))
            .collect())
    }

    pub async fn get(&self, id: Uuid, now: DateTime<Utc>) -> AppResult<ScheduleDetails> {
        let schedule = self.store.get(id).await?;
        Ok(self.details((schedule, None), now))
    }

    /// Create a schedule, deriving the next due date from the last
    /// performed date when none is given
    pub async fn create(
        &self,
        data: &CreateSchedule,
        created_by: Option<Uuid>,
    ) -> AppResult<MaintenanceSchedule> {
        let next_due = maintenance::resolve_next_due(
            data.frequency,
            data.frequency_interval,
            data.last_performed,
            data.next_due,
        )?;
        self.store.create(data, next_due, created_by).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateSchedule) -> AppResult<MaintenanceSchedule> {
        self.store.update(id, data).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.store.delete(id).await
    }

    /// Record that maintenance was performed and roll the schedule forward.
    ///
    /// Nothing is written when the schedule has no automatic interval.
    pub async fn complete(&self, id: Uuid, completed_on: NaiveDate) -> AppResult<MaintenanceSchedule> {
        let schedule = self.store.get(id).await?;
        let completion = maintenance::advance(&schedule, completed_on)?;
        let updated = self.store.record_completion(id, completion).await?;

        tracing::info!(
            schedule_id = %id,
            last_performed = %completion.last_performed,
            next_due = %completion.next_due,
            "Maintenance completed"
        );
        Ok(updated)
    }

    /// Active schedules due between `start` and `end` (inclusive)
    pub async fn calendar(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ScheduleDetails>> {
        if start > end {
            return Err(AppError::BadRequest("start must not be after end".to_string()));
        }
        let listings = self.store.list_due_between(start, end).await?;
        Ok(listings
            .into_iter()
            .map(|listing| self.details(listing, now))
            .collect())
    }

    /// Active schedules overdue at `now`
    pub async fn overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<ScheduleDetails>> {
        let query = ScheduleQuery {
            active: Some(true),
            due_before: Some(now.date_naive()),
            status: Some(DueStatus::Overdue),
            ..Default::default()
        };
        self.list(&query, now).await
    }

    pub async fn count_overdue(&self, now: DateTime<Utc>) -> AppResult<i64> {
        self.store.count_overdue(now.date_naive()).await
    }

    /// Schedules by last performed date, for the maintenance history report
    pub async fn history(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ScheduleDetails>> {
        let listings = self.store.list_performed_between(start, end).await?;
        Ok(listings
            .into_iter()
            .map(|listing| self.details(listing, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        maintenance::{Completion, InvalidSchedule},
        models::enums::Frequency,
        repository::schedules::MockScheduleStore,
    };
    use chrono::TimeZone;
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn schedule(id: Uuid, frequency: Frequency, next_due: NaiveDate) -> MaintenanceSchedule {
        MaintenanceSchedule {
            schedule_id: id,
            equipment_id: Uuid::new_v4(),
            maintenance_type: "Tube calibration".to_string(),
            frequency,
            frequency_interval: None,
            last_performed: None,
            next_due,
            estimated_hours: None,
            required_parts: None,
            procedure_details: None,
            is_active: true,
            created_date: Utc::now(),
            created_by: None,
        }
    }

    fn service(store: MockScheduleStore) -> SchedulesService {
        SchedulesService::new(Arc::new(store), 30)
    }

    #[tokio::test]
    async fn test_complete_rolls_monthly_schedule_to_month_end() {
        let id = Uuid::new_v4();
        let mut store = MockScheduleStore::new();
        store
            .expect_get()
            .with(eq(id))
            .returning(move |id| Ok(schedule(id, Frequency::Monthly, date(2024, 1, 31))));
        store
            .expect_record_completion()
            .withf(move |got_id, completion| {
                *got_id == id
                    && *completion
                        == Completion {
                            last_performed: date(2024, 1, 31),
                            next_due: date(2024, 2, 29),
                        }
            })
            .times(1)
            .returning(|id, completion| {
                let mut updated = schedule(id, Frequency::Monthly, completion.next_due);
                updated.last_performed = Some(completion.last_performed);
                Ok(updated)
            });

        let updated = service(store).complete(id, date(2024, 1, 31)).await.unwrap();
        assert_eq!(updated.next_due, date(2024, 2, 29));
        assert_eq!(updated.last_performed, Some(date(2024, 1, 31)));
    }

    #[tokio::test]
    async fn test_complete_as_needed_writes_nothing() {
        let id = Uuid::new_v4();
        let mut store = MockScheduleStore::new();
        store
            .expect_get()
            .returning(|id| Ok(schedule(id, Frequency::AsNeeded, date(2024, 6, 1))));
        store.expect_record_completion().times(0);

        let err = service(store).complete(id, date(2024, 6, 1)).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidSchedule(InvalidSchedule::NoAutomaticInterval(Frequency::AsNeeded))
        ));
    }

    #[tokio::test]
    async fn test_complete_missing_schedule_is_not_found() {
        let mut store = MockScheduleStore::new();
        store
            .expect_get()
            .returning(|id| Err(AppError::NotFound(format!("Schedule {} not found", id))));
        store.expect_record_completion().times(0);

        let err = service(store)
            .complete(Uuid::new_v4(), date(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_requires_a_due_date_source() {
        let mut store = MockScheduleStore::new();
        store.expect_create().times(0);

        let data = CreateSchedule {
            equipment_id: Uuid::new_v4(),
            maintenance_type: "Annual QA".to_string(),
            frequency: Frequency::Annual,
            frequency_interval: None,
            last_performed: None,
            next_due: None,
            estimated_hours: None,
            required_parts: None,
            procedure_details: None,
            is_active: None,
        };

        let err = service(store).create(&data, None).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidSchedule(InvalidSchedule::MissingNextDue)
        ));
    }

    #[tokio::test]
    async fn test_create_derives_next_due_from_last_performed() {
        let mut store = MockScheduleStore::new();
        store
            .expect_create()
            .withf(|_, next_due, _| *next_due == date(2024, 9, 15))
            .times(1)
            .returning(|data, next_due, _| {
                let mut created = schedule(Uuid::new_v4(), data.frequency, next_due);
                created.last_performed = data.last_performed;
                Ok(created)
            });

        let data = CreateSchedule {
            equipment_id: Uuid::new_v4(),
            maintenance_type: "Quarterly PM".to_string(),
            frequency: Frequency::Quarterly,
            frequency_interval: None,
            last_performed: Some(date(2024, 6, 15)),
            next_due: None,
            estimated_hours: None,
            required_parts: None,
            procedure_details: None,
            is_active: None,
        };

        let created = service(store).create(&data, None).await.unwrap();
        assert_eq!(created.next_due, date(2024, 9, 15));
    }

    #[tokio::test]
    async fn test_list_classifies_and_filters_by_status() {
        let mut store = MockScheduleStore::new();
        store.expect_list().returning(|_| {
            Ok(vec![
                (schedule(Uuid::new_v4(), Frequency::Monthly, date(2024, 5, 1)), Some("CT-1".to_string())),
                (schedule(Uuid::new_v4(), Frequency::Monthly, date(2024, 6, 10)), Some("MRI-2".to_string())),
                (schedule(Uuid::new_v4(), Frequency::Annual, date(2025, 1, 1)), None),
            ])
        });

        let now = noon(2024, 6, 1);
        let service = service(store);

        let all = service.list(&ScheduleQuery::default(), now).await.unwrap();
        let statuses: Vec<DueStatus> = all.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![DueStatus::Overdue, DueStatus::DueSoon, DueStatus::Scheduled]
        );

        let query = ScheduleQuery {
            status: Some(DueStatus::DueSoon),
            ..Default::default()
        };
        let due_soon = service.list(&query, now).await.unwrap();
        assert_eq!(due_soon.len(), 1);
        assert_eq!(due_soon[0].equipment_name.as_deref(), Some("MRI-2"));
    }

    #[tokio::test]
    async fn test_configured_window_changes_classification() {
        let mut store = MockScheduleStore::new();
        store.expect_get().returning(|id| Ok(schedule(id, Frequency::Weekly, date(2024, 6, 20))));

        let narrow = SchedulesService::new(Arc::new(store), 7);
        let details = narrow.get(Uuid::new_v4(), noon(2024, 6, 1)).await.unwrap();
        assert_eq!(details.status, DueStatus::Scheduled);
    }

    #[test]
    fn test_window_is_clamped_to_accepted_range() {
        let negative = SchedulesService::new(Arc::new(MockScheduleStore::new()), -5);
        assert_eq!(negative.due_soon_window(), Duration::days(1));
        // Tomorrow stays due soon instead of falling outside a negative window
        assert_eq!(
            negative.classify(date(2024, 6, 2), noon(2024, 6, 1)),
            DueStatus::DueSoon
        );

        let huge = SchedulesService::new(Arc::new(MockScheduleStore::new()), 200_000_000_000);
        assert_eq!(huge.due_soon_window(), Duration::days(MAX_DUE_SOON_DAYS));
    }

    #[tokio::test]
    async fn test_calendar_rejects_inverted_range() {
        let mut store = MockScheduleStore::new();
        store.expect_list_due_between().times(0);

        let err = service(store)
            .calendar(date(2024, 7, 1), date(2024, 6, 1), noon(2024, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
