//! Technician model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Field-service technician
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Technician {
    pub technician_id: Uuid,
    pub technician_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Modalities the technician is qualified on
    pub specialization: Option<String>,
    pub certification: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

/// Create technician request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTechnician {
    #[validate(length(min = 1, max = 50, message = "Code is required"))]
    pub technician_code: String,
    #[validate(length(min = 2, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 100, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub specialization: Option<String>,
    #[validate(length(max = 255))]
    pub certification: Option<String>,
    pub is_active: Option<bool>,
}

/// Update technician request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTechnician {
    #[validate(length(min = 1, max = 50))]
    pub technician_code: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub certification: Option<String>,
    pub is_active: Option<bool>,
}
