//! User accounts repository

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use super::constraint_error;
use crate::{
    error::{AppError, AppResult},
    models::user::UserAccount,
};

/// Fields of a new account; the password is already hashed
pub struct NewUserAccount<'a> {
    pub email: &'a str,
    pub full_name: Option<&'a str>,
    pub password_hash: &'a str,
    pub is_admin: bool,
    /// Grant administrator rights when no account exists yet
    pub admin_if_first: bool,
    pub must_change_password: bool,
}

/// Advisory lock key serializing first-account creation
const FIRST_ACCOUNT_LOCK: i64 = 0x5241_4449_4f00_0001;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<UserAccount> {
        sqlx::query_as::<_, UserAccount>("SELECT * FROM user_accounts WHERE user_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Get user by email (case-insensitive)
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<UserAccount>> {
        let user = sqlx::query_as::<_, UserAccount>(
            "SELECT * FROM user_accounts WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM user_accounts WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create an account.
    ///
    /// With `admin_if_first`, the administrator decision is taken by the
    /// INSERT itself under a transaction-scoped advisory lock, so two
    /// concurrent sign-ups on an empty table cannot both be promoted.
    pub async fn create(&self, account: &NewUserAccount<'_>) -> AppResult<UserAccount> {
        let mut tx = self.pool.begin().await?;

        if account.admin_if_first {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(FIRST_ACCOUNT_LOCK)
                .execute(&mut *tx)
                .await?;
        }

        let user = sqlx::query_as::<_, UserAccount>(
            r#"
            INSERT INTO user_accounts (
                user_id, email, full_name, password_hash, is_admin, must_change_password
            )
            SELECT $1, $2, $3, $4,
                   $5 OR ($6 AND NOT EXISTS (SELECT 1 FROM user_accounts)),
                   $7
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(account.email)
        .bind(account.full_name)
        .bind(account.password_hash)
        .bind(account.is_admin)
        .bind(account.admin_if_first)
        .bind(account.must_change_password)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| constraint_error(e, "An account with this email"))?;

        tx.commit().await?;
        Ok(user)
    }

    /// Store a new password hash and lift the forced-change flag
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<UserAccount> {
        sqlx::query_as::<_, UserAccount>(
            r#"
            UPDATE user_accounts
            SET password_hash = $1, must_change_password = FALSE, password_changed_at = $2
            WHERE user_id = $3
            RETURNING *
            "#,
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }
}
