//! Equipment (inventory) model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{EquipmentStatus, RiskLevel};

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub equipment_id: Uuid,
    /// Asset tag, unique across the inventory
    pub inventory_number: String,
    pub serial_number: Option<String>,
    pub model_number: Option<String>,
    pub equipment_name: String,
    /// Modality (CT, MRI, X-Ray, ...)
    pub equipment_type: String,
    pub manufacturer_id: Option<i32>,
    pub location_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub risk_level: Option<RiskLevel>,
    pub status: EquipmentStatus,
    pub created_date: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
    // Joined names, only filled on the detail lookup
    #[sqlx(default)]
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[sqlx(default)]
    #[serde(default)]
    pub department_name: Option<String>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 50, message = "Inventory number is required"))]
    pub inventory_number: String,
    #[validate(length(max = 100))]
    pub serial_number: Option<String>,
    #[validate(length(max = 100))]
    pub model_number: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Equipment name is required"))]
    pub equipment_name: String,
    #[validate(length(min = 1, max = 100, message = "Equipment type is required"))]
    pub equipment_type: String,
    pub manufacturer_id: Option<i32>,
    pub location_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub risk_level: Option<RiskLevel>,
    pub status: Option<EquipmentStatus>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 50))]
    pub inventory_number: Option<String>,
    pub serial_number: Option<String>,
    pub model_number: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub equipment_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub equipment_type: Option<String>,
    pub manufacturer_id: Option<i32>,
    pub location_id: Option<i32>,
    pub installation_date: Option<NaiveDate>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub warranty_expiry: Option<NaiveDate>,
    pub risk_level: Option<RiskLevel>,
    pub status: Option<EquipmentStatus>,
}

/// Equipment list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    pub status: Option<EquipmentStatus>,
    /// Case-insensitive match on name, inventory number or serial number
    pub search: Option<String>,
}
