//! Technicians repository

use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::{constraint_error, push_updates};
use crate::{
    error::{AppError, AppResult},
    models::technician::{CreateTechnician, Technician, UpdateTechnician},
};

#[derive(Clone)]
pub struct TechniciansRepository {
    pool: Pool<Postgres>,
}

impl TechniciansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List technicians, ordered by last name
    pub async fn list(&self) -> AppResult<Vec<Technician>> {
        let rows = sqlx::query_as::<_, Technician>(
            "SELECT * FROM technicians ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Technician> {
        sqlx::query_as::<_, Technician>("SELECT * FROM technicians WHERE technician_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Technician {} not found", id)))
    }

    pub async fn create(&self, data: &CreateTechnician) -> AppResult<Technician> {
        sqlx::query_as::<_, Technician>(
            r#"
            INSERT INTO technicians (
                technician_id, technician_code, first_name, last_name, email, phone,
                specialization, certification, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.technician_code)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.specialization)
        .bind(&data.certification)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Technician with this code"))
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTechnician) -> AppResult<Technician> {
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE technicians SET technician_id = technician_id");

        push_updates!(builder, data, [
            technician_code,
            first_name,
            last_name,
            email,
            phone,
            specialization,
            certification,
            is_active,
        ]);

        builder.push(" WHERE technician_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Technician>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, "Technician with this code"))?
            .ok_or_else(|| AppError::NotFound(format!("Technician {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM technicians WHERE technician_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Technician {} not found", id)));
        }
        Ok(())
    }
}
