//! Customers and their locations

use sqlx::{Pool, Postgres, QueryBuilder};

use super::{constraint_error, push_updates};
use crate::{
    error::{AppError, AppResult},
    models::customer::{
        CreateCustomer, CreateLocation, Customer, Location, UpdateCustomer, UpdateLocation,
    },
};

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Customers ----

    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY customer_name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE customer_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))
    }

    pub async fn create(&self, data: &CreateCustomer) -> AppResult<Customer> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (
                customer_code, customer_name, contact_name, phone, email, address,
                city, state_province, postal_code, country, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&data.customer_code)
        .bind(&data.customer_name)
        .bind(&data.contact_name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.state_province)
        .bind(&data.postal_code)
        .bind(&data.country)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Customer with this code"))
    }

    pub async fn update(&self, id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE customers SET customer_id = customer_id");

        push_updates!(builder, data, [
            customer_code,
            customer_name,
            contact_name,
            phone,
            email,
            address,
            city,
            state_province,
            postal_code,
            country,
            is_active,
        ]);

        builder.push(" WHERE customer_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Customer>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| constraint_error(e, "Customer with this code"))?
            .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))
    }

    /// Delete a customer (cascade deletes locations)
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Customer {} not found", id)));
        }
        Ok(())
    }

    // ---- Locations ----

    pub async fn list_locations(&self, customer_id: i32) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE customer_id = $1 ORDER BY department_name, room_number",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_location(&self, customer_id: i32, data: &CreateLocation) -> AppResult<Location> {
        sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (
                customer_id, facility_code, facility_name, building_code, department_name,
                room_number, floor_level, description, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(&data.facility_code)
        .bind(&data.facility_name)
        .bind(&data.building_code)
        .bind(&data.department_name)
        .bind(&data.room_number)
        .bind(&data.floor_level)
        .bind(&data.description)
        .bind(data.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_error(e, "Location"))
    }

    pub async fn update_location(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        let mut builder =
            QueryBuilder::<Postgres>::new("UPDATE locations SET location_id = location_id");

        push_updates!(builder, data, [
            facility_code,
            facility_name,
            building_code,
            department_name,
            room_number,
            floor_level,
            description,
            is_active,
        ]);

        builder.push(" WHERE location_id = ").push_bind(id).push(" RETURNING *");

        builder
            .build_query_as::<Location>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }

    pub async fn delete_location(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM locations WHERE location_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Location {} not found", id)));
        }
        Ok(())
    }
}
