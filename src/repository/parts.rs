//! Spare parts repository

use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{constraint_error, push_updates};
use crate::{
    error::{AppError, AppResult},
    models::part::{CreatePart, Part, PartQuery, UpdatePart},
};

#[derive(Clone)]
pub struct PartsRepository {
    pool: Pool<Postgres>,
}

impl PartsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List parts with their manufacturer name, optionally by category or low stock only
    pub async fn list(&self, query: &PartQuery) -> AppResult<Vec<Part>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT p.*, m.manufacturer_name
            FROM parts_inventory p
            LEFT JOIN manufacturers m ON m.manufacturer_id = p.manufacturer_id
            WHERE TRUE
            "#,
        );

        if let Some(ref category) = query.category {
            builder.push(" AND p.category = ").push_bind(category.clone());
        }
        if query.low_stock == Some(true) {
            builder.push(" AND p.current_stock <= COALESCE(p.minimum_stock, 0)");
        }
        builder.push(" ORDER BY p.part_name");

        let rows = builder
            .build_query_as::<Part>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Part> {
        sqlx::query_as::<_, Part>("SELECT * FROM parts_inventory WHERE part_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Part {} not found", id)))
    }

    pub async fn create(&self, data: &CreatePart) -> AppResult<Part> {
        sqlx::query_as::<_, Part>(
            r#"
            INSERT INTO parts_inventory (
                part_id, part_number, part_name, equipment_id, manufacturer_id, category,
                unit_cost, current_stock, minimum_stock, maximum_stock, reorder_point,
                storage_location, lead_time_days, last_order_date, expiry_date,
                serial_number, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.part_number)
        .bind(&data.part_name)
        .bind(data.equipment_id)
        .bind(data.manufacturer_id)
        .bind(&data.category)
        .bind(data.unit_cost)
        .bind(data.current_stock.unwrap_or(0))
        .bind(data.minimum_stock)
        .bind(data.maximum_stock)
        .bind(data.reorder_point)
        .bind(&data.storage_location)
        .bind(data.lead_time_days)
        .bind(data.last_order_date)
        .bind(data.expiry_date)
        .bind(&data.serial_number)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Part"))
    }

    pub async fn update(&self, id: Uuid, data: &UpdatePart) -> AppResult<Part> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE parts_inventory SET part_id = part_id");

        push_updates!(builder, data, [
            part_number,
            part_name,
            equipment_id,
            manufacturer_id,
            category,
            unit_cost,
            current_stock,
            minimum_stock,
            maximum_stock,
            reorder_point,
            storage_location,
            lead_time_days,
            last_order_date,
            expiry_date,
            serial_number,
            is_active,
        ]);

        builder.push(" WHERE part_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Part>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, "Part"))?
            .ok_or_else(|| AppError::NotFound(format!("Part {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM parts_inventory WHERE part_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Part {} not found", id)));
        }
        Ok(())
    }

    /// Count parts at or below minimum stock
    /// Distinct part categories in use, sorted
    pub async fn categories(&self) -> AppResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT category FROM parts_inventory
            WHERE category IS NOT NULL AND category <> ''
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn count_low_stock(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM parts_inventory WHERE is_active = TRUE AND current_stock <= COALESCE(minimum_stock, 0)",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
