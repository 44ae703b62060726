//! Equipment (inventory) repository

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{constraint_error, like_pattern, push_updates};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, ordered by name
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM inventory WHERE TRUE");

        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(ref search) = query.search {
            let pattern = like_pattern(search);
            builder
                .push(" AND (equipment_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR inventory_number ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR serial_number ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder.push(" ORDER BY equipment_name");

        let rows = builder
            .build_query_as::<Equipment>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID, with its manufacturer and department names
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            SELECT i.*, m.manufacturer_name, l.department_name
            FROM inventory i
            LEFT JOIN manufacturers m ON m.manufacturer_id = i.manufacturer_id
            LEFT JOIN locations l ON l.location_id = i.location_id
            WHERE i.equipment_id = $1
            "#,
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment, created_by: Option<Uuid>) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO inventory (
                equipment_id, inventory_number, serial_number, model_number,
                equipment_name, equipment_type, manufacturer_id, location_id,
                installation_date, purchase_date, purchase_price, warranty_expiry,
                risk_level, status, created_by, modified_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.inventory_number)
        .bind(&data.serial_number)
        .bind(&data.model_number)
        .bind(&data.equipment_name)
        .bind(&data.equipment_type)
        .bind(data.manufacturer_id)
        .bind(data.location_id)
        .bind(data.installation_date)
        .bind(data.purchase_date)
        .bind(data.purchase_price)
        .bind(data.warranty_expiry)
        .bind(data.risk_level)
        .bind(data.status.unwrap_or_default())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Equipment with this inventory number"))
    }

    /// Update equipment
    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateEquipment,
        modified_by: Option<Uuid>,
    ) -> AppResult<Equipment> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE inventory SET last_modified = ");
        builder.push_bind(Utc::now());
        builder.push(", modified_by = ").push_bind(modified_by);

        push_updates!(builder, data, [
            inventory_number,
            serial_number,
            model_number,
            equipment_name,
            equipment_type,
            manufacturer_id,
            location_id,
            installation_date,
            purchase_date,
            purchase_price,
            warranty_expiry,
            risk_level,
            status,
        ]);

        builder.push(" WHERE equipment_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Equipment>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, "Equipment with this inventory number"))?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment (cascades to its schedules and work orders)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE equipment_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Count equipment in a given status
    pub async fn count_with_status(&self, status: EquipmentStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Equipment count per status
    pub async fn count_by_status(&self) -> AppResult<Vec<(EquipmentStatus, i64)>> {
        let rows: Vec<(EquipmentStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM inventory GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Equipment whose warranty expires in `(after, until]`
    pub async fn warranties_expiring(
        &self,
        after: NaiveDate,
        until: NaiveDate,
    ) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT * FROM inventory
            WHERE warranty_expiry > $1 AND warranty_expiry <= $2
            ORDER BY warranty_expiry
            "#,
        )
        .bind(after)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
