//! Customer and location models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// ---------------------------------------------------------------------------
// Customer
// ---------------------------------------------------------------------------

/// Customer (hospital, clinic, imaging center)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub customer_id: i32,
    pub customer_code: String,
    pub customer_name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

/// Create customer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 50, message = "Code is required"))]
    pub customer_code: String,
    #[validate(length(min = 2, max = 255, message = "Name must be at least 2 characters"))]
    pub customer_name: String,
    #[validate(length(max = 255))]
    pub contact_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub address: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub state_province: Option<String>,
    #[validate(length(max = 20))]
    pub postal_code: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
    pub is_active: Option<bool>,
}

/// Update customer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 50))]
    pub customer_code: Option<String>,
    #[validate(length(min = 2, max = 255))]
    pub customer_name: Option<String>,
    pub contact_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email"))]
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state_province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A department or room belonging to a customer
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub location_id: i32,
    pub customer_id: Option<i32>,
    pub facility_code: Option<String>,
    pub facility_name: Option<String>,
    pub building_code: Option<String>,
    pub department_name: String,
    pub room_number: Option<String>,
    pub floor_level: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
}

/// Create location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocation {
    pub facility_code: Option<String>,
    pub facility_name: Option<String>,
    pub building_code: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Department name is required"))]
    pub department_name: String,
    pub room_number: Option<String>,
    pub floor_level: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

/// Update location request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLocation {
    pub facility_code: Option<String>,
    pub facility_name: Option<String>,
    pub building_code: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub department_name: Option<String>,
    pub room_number: Option<String>,
    pub floor_level: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
