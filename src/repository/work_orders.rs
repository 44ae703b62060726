//! Work orders repository

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{constraint_error, like_pattern, push_updates};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::WorkOrderStatus,
        work_order::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderQuery},
    },
};

const SELECT_WITH_EQUIPMENT: &str = r#"
    SELECT w.*, i.equipment_name
    FROM work_orders w
    LEFT JOIN inventory i ON i.equipment_id = w.equipment_id
    WHERE TRUE
"#;

#[derive(Clone)]
pub struct WorkOrdersRepository {
    pool: Pool<Postgres>,
}

impl WorkOrdersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List work orders, most recent request first
    pub async fn list(&self, query: &WorkOrderQuery) -> AppResult<Vec<WorkOrder>> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_WITH_EQUIPMENT);

        if let Some(status) = query.status {
            builder.push(" AND w.status = ").push_bind(status);
        }
        if let Some(equipment_id) = query.equipment_id {
            builder.push(" AND w.equipment_id = ").push_bind(equipment_id);
        }
        if let Some(ref search) = query.search {
            let pattern = like_pattern(search);
            builder
                .push(" AND (w.workorder_number ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR w.problem_description ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR i.equipment_name ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder.push(" ORDER BY w.request_date DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit.max(0));
        }

        let rows = builder
            .build_query_as::<WorkOrder>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a work order by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<WorkOrder> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_WITH_EQUIPMENT);
        builder.push(" AND w.workorder_id = ").push_bind(id);

        builder
            .build_query_as::<WorkOrder>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Work order {} not found", id)))
    }

    /// Create a work order with the given number, in the Open state
    pub async fn create(
        &self,
        data: &CreateWorkOrder,
        workorder_number: &str,
        created_by: Option<Uuid>,
    ) -> AppResult<WorkOrder> {
        sqlx::query_as::<_, WorkOrder>(
            r#"
            INSERT INTO work_orders (
                workorder_id, workorder_number, equipment_id, workorder_type, priority,
                requested_by, assigned_technician, problem_description, fault_code,
                scheduled_date, status, created_by, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(workorder_number)
        .bind(data.equipment_id)
        .bind(data.workorder_type)
        .bind(data.priority)
        .bind(&data.requested_by)
        .bind(data.assigned_technician)
        .bind(&data.problem_description)
        .bind(&data.fault_code)
        .bind(data.scheduled_date)
        .bind(WorkOrderStatus::Open)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Work order"))
    }

    /// Update a work order
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateWorkOrder,
        modified_by: Option<Uuid>,
    ) -> AppResult<WorkOrder> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE work_orders SET last_modified = ");
        builder.push_bind(Utc::now());
        builder.push(", modified_by = ").push_bind(modified_by);

        push_updates!(builder, data, [
            workorder_type,
            priority,
            status,
            assigned_technician,
            service_provider,
            problem_description,
            fault_code,
            scheduled_date,
            start_date,
            completion_date,
            downtime_hours,
            work_description,
            resolution,
            labor_hours,
            labor_cost,
            parts_cost,
            total_cost,
        ]);

        builder.push(" WHERE workorder_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<WorkOrder>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, "Work order"))?
            .ok_or_else(|| AppError::NotFound(format!("Work order {} not found", id)))
    }

    /// Delete a work order
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM work_orders WHERE workorder_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Work order {} not found", id)));
        }
        Ok(())
    }

    /// Count work orders still Open or In Progress
    pub async fn count_open(&self) -> AppResult<i64> {
        let open: Vec<String> = WorkOrderStatus::OPEN_STATES
            .iter()
            .map(|s| s.as_str().to_string())
            .collect();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM work_orders WHERE status = ANY($1)")
            .bind(open)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
