//! Manufacturer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Equipment manufacturer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Manufacturer {
    pub manufacturer_id: i32,
    pub manufacturer_code: Option<String>,
    pub manufacturer_name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

/// Create manufacturer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateManufacturer {
    #[validate(length(min = 1, max = 50, message = "Code is required"))]
    pub manufacturer_code: String,
    #[validate(length(min = 2, max = 255, message = "Name must be at least 2 characters"))]
    pub manufacturer_name: String,
    #[validate(length(max = 255))]
    pub contact_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub website: Option<String>,
    pub is_active: Option<bool>,
}

/// Update manufacturer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateManufacturer {
    #[validate(length(min = 1, max = 50))]
    pub manufacturer_code: Option<String>,
    #[validate(length(min = 2, max = 255))]
    pub manufacturer_name: Option<String>,
    pub contact_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(url(message = "Invalid URL"))]
    pub website: Option<String>,
    pub is_active: Option<bool>,
}
