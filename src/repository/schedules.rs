//! Maintenance schedules repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{constraint_error, push_updates};
use crate::{
    error::{AppError, AppResult},
    maintenance::Completion,
    models::schedule::{
        CreateSchedule, MaintenanceSchedule, ScheduleQuery, ScheduleRow, UpdateSchedule,
    },
};

/// A schedule together with the name of its equipment
pub type ScheduleListing = (MaintenanceSchedule, Option<String>);

const SELECT_WITH_EQUIPMENT: &str = r#"
    SELECT s.*, i.equipment_name
    FROM schedules s
    LEFT JOIN inventory i ON i.equipment_id = s.equipment_id
    WHERE TRUE
"#;

/// Storage of maintenance schedules
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Schedules matching the filters, ordered by next due date
    async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<ScheduleListing>>;

    /// Active schedules due within `[start, end]`
    async fn list_due_between(&self, start: NaiveDate, end: NaiveDate)
        -> AppResult<Vec<ScheduleListing>>;

    /// Schedules last performed within the optional range, most recent first.
    /// Without bounds, never-performed schedules are listed last.
    async fn list_performed_between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<ScheduleListing>>;

    async fn get(&self, id: Uuid) -> AppResult<MaintenanceSchedule>;

    async fn create(
        &self,
        data: &CreateSchedule,
        next_due: NaiveDate,
        created_by: Option<Uuid>,
    ) -> AppResult<MaintenanceSchedule>;

    async fn update(&self, id: Uuid, data: &UpdateSchedule) -> AppResult<MaintenanceSchedule>;

    /// Persist a completion (last performed and next due dates)
    async fn record_completion(&self, id: Uuid, completion: Completion)
        -> AppResult<MaintenanceSchedule>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Active schedules whose due date is on or before `today`
    async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64>;
}

#[derive(Clone)]
pub struct SchedulesRepository {
    pool: Pool<Postgres>,
}

impl SchedulesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_listings(rows: Vec<ScheduleRow>) -> AppResult<Vec<ScheduleListing>> {
    rows.into_iter()
        .map(ScheduleRow::into_parts)
        .collect()
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Schedule {} not found", id))
}

#[async_trait]
impl ScheduleStore for SchedulesRepository {
    async fn list(&self, query: &ScheduleQuery) -> AppResult<Vec<ScheduleListing>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_WITH_EQUIPMENT);

        if let Some(equipment_id) = query.equipment_id {
            builder.push(" AND s.equipment_id = ").push_bind(equipment_id);
        }
        if let Some(active) = query.active {
            builder.push(" AND s.is_active = ").push_bind(active);
        }
        if let Some(due_before) = query.due_before {
            builder.push(" AND s.next_due <= ").push_bind(due_before);
        }
        builder.push(" ORDER BY s.next_due, s.schedule_id");

        let rows = builder
            .build_query_as::<ScheduleRow>()
            .fetch_all(&self.pool)
            .await?;
        into_listings(rows)
    }

    async fn list_due_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleListing>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_WITH_EQUIPMENT);
        builder
            .push(" AND s.is_active = TRUE AND s.next_due >= ")
            .push_bind(start)
            .push(" AND s.next_due <= ")
            .push_bind(end)
            .push(" ORDER BY s.next_due, s.schedule_id");

        let rows = builder
            .build_query_as::<ScheduleRow>()
            .fetch_all(&self.pool)
            .await?;
        into_listings(rows)
    }

    async fn list_performed_between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<ScheduleListing>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_WITH_EQUIPMENT);
        if let Some(start) = start {
            builder.push(" AND s.last_performed >= ").push_bind(start);
        }
        if let Some(end) = end {
            builder.push(" AND s.last_performed <= ").push_bind(end);
        }
        builder.push(" ORDER BY s.last_performed DESC NULLS LAST, s.schedule_id");

        let rows = builder
            .build_query_as::<ScheduleRow>()
            .fetch_all(&self.pool)
            .await?;
        into_listings(rows)
    }

    async fn get(&self, id: Uuid) -> AppResult<MaintenanceSchedule> {
        let row = sqlx::query_as::<_, ScheduleRow>("SELECT * FROM schedules WHERE schedule_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;
        row.into_schedule()
    }

    async fn create(
        &self,
        data: &CreateSchedule,
        next_due: NaiveDate,
        created_by: Option<Uuid>,
    ) -> AppResult<MaintenanceSchedule> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            INSERT INTO schedules (
                schedule_id, equipment_id, maintenance_type, frequency, frequency_interval,
                last_performed, next_due, estimated_hours, required_parts, procedure_details,
                is_active, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(data.equipment_id)
        .bind(&data.maintenance_type)
        .bind(data.frequency)
        .bind(data.frequency_interval)
        .bind(data.last_performed)
        .bind(next_due)
        .bind(data.estimated_hours)
        .bind(&data.required_parts)
        .bind(&data.procedure_details)
        .bind(data.is_active.unwrap_or(true))
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Schedule"))?;
        row.into_schedule()
    }

    async fn update(&self, id: Uuid, data: &UpdateSchedule) -> AppResult<MaintenanceSchedule> {
        // No-op assignment so every optional field can be appended with a leading comma
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE schedules SET schedule_id = schedule_id");

        push_updates!(builder, data, [
            equipment_id,
            maintenance_type,
            frequency,
            frequency_interval,
            last_performed,
            next_due,
            estimated_hours,
            required_parts,
            procedure_details,
            is_active,
        ]);

        builder.push(" WHERE schedule_id = ").push_bind(id).push(" RETURNING *");

        let row = builder
            .build_query_as::<ScheduleRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, "Schedule"))?
            .ok_or_else(|| not_found(id))?;
        row.into_schedule()
    }

    async fn record_completion(
        &self,
        id: Uuid,
        completion: Completion,
    ) -> AppResult<MaintenanceSchedule> {
        let row = sqlx::query_as::<_, ScheduleRow>(
            r#"
            UPDATE schedules
            SET last_performed = $1, next_due = $2
            WHERE schedule_id = $3
            RETURNING *
            "#,
        )
        .bind(completion.last_performed)
        .bind(completion.next_due)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found(id))?;
        row.into_schedule()
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE schedule_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn count_overdue(&self, today: NaiveDate) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM schedules WHERE is_active = TRUE AND next_due <= $1",
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
