//! Repository layer for database operations

pub mod customers;
pub mod equipment;
pub mod manufacturers;
pub mod parts;
pub mod schedules;
pub mod technicians;
pub mod users;
pub mod work_orders;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Append `, <field> = $n` to an UPDATE for every field set on the request
macro_rules! push_updates {
    ($builder:expr, $data:expr, [$($field:ident),+ $(,)?]) => {
        $(
            if let Some(ref value) = $data.$field {
                $builder
                    .push(concat!(", ", stringify!($field), " = "))
                    .push_bind(value.clone());
            }
        )+
    };
}
pub(crate) use push_updates;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub schedules: schedules::SchedulesRepository,
    pub work_orders: work_orders::WorkOrdersRepository,
    pub technicians: technicians::TechniciansRepository,
    pub manufacturers: manufacturers::ManufacturersRepository,
    pub customers: customers::CustomersRepository,
    pub parts: parts::PartsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            schedules: schedules::SchedulesRepository::new(pool.clone()),
            work_orders: work_orders::WorkOrdersRepository::new(pool.clone()),
            technicians: technicians::TechniciansRepository::new(pool.clone()),
            manufacturers: manufacturers::ManufacturersRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            parts: parts::PartsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Translate constraint violations into client errors
pub(crate) fn constraint_error(err: sqlx::Error, what: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("{} already exists", what))
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            AppError::Validation(format!("{} references a record that does not exist", what))
        }
        _ => AppError::Database(err),
    }
}

/// `%term%` pattern for ILIKE searches
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("CT"), "%CT%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
