//! API handlers for the radiology maintenance REST endpoints

pub mod alerts;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod manufacturers;
pub mod openapi;
pub mod parts;
pub mod reports;
pub mod schedules;
pub mod technicians;
pub mod work_orders;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, models::user::Session, AppState};

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))
}

/// Any live session, including one that still has to change its password.
/// Only the account endpoints (me, logout, password change) accept this.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let session = state.services.auth.authenticate(token).await?;
        Ok(CurrentSession(session))
    }
}

/// Extractor for an authenticated user whose password is current
pub struct AuthenticatedUser(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        session.require_password_current()?;
        Ok(AuthenticatedUser(session))
    }
}
