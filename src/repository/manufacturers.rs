//! Manufacturers repository

use sqlx::{Pool, Postgres, QueryBuilder};

use super::{constraint_error, push_updates};
use crate::{
    error::{AppError, AppResult},
    models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer},
};

#[derive(Clone)]
pub struct ManufacturersRepository {
    pool: Pool<Postgres>,
}

impl ManufacturersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Manufacturer>> {
        let rows = sqlx::query_as::<_, Manufacturer>(
            "SELECT * FROM manufacturers ORDER BY manufacturer_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Manufacturer> {
        sqlx::query_as::<_, Manufacturer>("SELECT * FROM manufacturers WHERE manufacturer_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Manufacturer {} not found", id)))
    }

    pub async fn create(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        sqlx::query_as::<_, Manufacturer>(
            r#"
            INSERT INTO manufacturers (
                manufacturer_code, manufacturer_name, contact_name, phone, email,
                address, website, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.manufacturer_code)
        .bind(&data.manufacturer_name)
        .bind(&data.contact_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.website)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Manufacturer"))
    }

    pub async fn update(&self, id: i32, data: &UpdateManufacturer) -> AppResult<Manufacturer> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "UPDATE manufacturers SET manufacturer_id = manufacturer_id",
        );

        push_updates!(builder, data, [
            manufacturer_code,
            manufacturer_name,
            contact_name,
            phone,
            email,
            address,
            website,
            is_active,
        ]);

        builder.push(" WHERE manufacturer_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Manufacturer>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Manufacturer {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM manufacturers WHERE manufacturer_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Manufacturer {} not found", id)));
        }
        Ok(())
    }
}
