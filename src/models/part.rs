//! Spare-parts inventory model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Spare part stock record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Part {
    pub part_id: Uuid,
    pub part_number: String,
    pub part_name: String,
    pub equipment_id: Option<Uuid>,
    pub manufacturer_id: Option<i32>,
    pub category: Option<String>,
    pub unit_cost: Option<Decimal>,
    pub current_stock: i32,
    pub minimum_stock: Option<i32>,
    pub maximum_stock: Option<i32>,
    pub reorder_point: Option<i32>,
    pub storage_location: Option<String>,
    pub lead_time_days: Option<i32>,
    pub last_order_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub serial_number: Option<String>,
    pub is_active: bool,
    pub created_date: DateTime<Utc>,
    /// Joined from manufacturers on listings
    #[sqlx(default)]
    #[serde(default)]
    pub manufacturer_name: Option<String>,
}

impl Part {
    /// Stock at or below the minimum (a missing minimum counts as zero)
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.minimum_stock.unwrap_or(0)
    }

    /// Stock value at unit cost
    pub fn stock_value(&self) -> Decimal {
        self.unit_cost.unwrap_or_default() * Decimal::from(self.current_stock)
    }

    /// Status label shown in reports
    pub fn stock_label(&self) -> &'static str {
        if self.is_low_stock() {
            "Low Stock"
        } else if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Create part request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePart {
    #[validate(length(min = 1, max = 10, message = "Part number is required"))]
    pub part_number: String,
    #[validate(length(min = 2, max = 30, message = "Part name is required"))]
    pub part_name: String,
    pub equipment_id: Option<Uuid>,
    pub manufacturer_id: Option<i32>,
    #[validate(length(max = 255))]
    pub category: Option<String>,
    pub unit_cost: Option<Decimal>,
    #[validate(range(min = 0))]
    pub current_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub minimum_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub maximum_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub reorder_point: Option<i32>,
    #[validate(length(max = 255))]
    pub storage_location: Option<String>,
    #[validate(range(min = 0))]
    pub lead_time_days: Option<i32>,
    pub last_order_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[validate(length(max = 16))]
    pub serial_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Update part request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePart {
    #[validate(length(min = 1, max = 10))]
    pub part_number: Option<String>,
    #[validate(length(min = 2, max = 30))]
    pub part_name: Option<String>,
    pub equipment_id: Option<Uuid>,
    pub manufacturer_id: Option<i32>,
    pub category: Option<String>,
    pub unit_cost: Option<Decimal>,
    #[validate(range(min = 0))]
    pub current_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub minimum_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub maximum_stock: Option<i32>,
    #[validate(range(min = 0))]
    pub reorder_point: Option<i32>,
    pub storage_location: Option<String>,
    pub lead_time_days: Option<i32>,
    pub last_order_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    #[validate(length(max = 16))]
    pub serial_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Part list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PartQuery {
    pub category: Option<String>,
    /// Only parts at or below their minimum stock
    pub low_stock: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(current: i32, minimum: Option<i32>, unit_cost: Option<Decimal>) -> Part {
        Part {
            part_id: Uuid::new_v4(),
            part_number: "XR-100".to_string(),
            part_name: "Collimator lamp".to_string(),
            equipment_id: None,
            manufacturer_id: None,
            category: Some("Optics".to_string()),
            unit_cost,
            current_stock: current,
            minimum_stock: minimum,
            maximum_stock: None,
            reorder_point: None,
            storage_location: None,
            lead_time_days: None,
            last_order_date: None,
            expiry_date: None,
            serial_number: None,
            is_active: true,
            created_date: Utc::now(),
            manufacturer_name: None,
        }
    }

    #[test]
    fn test_low_stock_rule() {
        assert!(part(2, Some(2), None).is_low_stock());
        assert!(!part(3, Some(2), None).is_low_stock());
        // Missing minimum is treated as zero
        assert!(part(0, None, None).is_low_stock());
        assert!(!part(1, None, None).is_low_stock());
    }

    #[test]
    fn test_stock_value() {
        let p = part(4, None, Some(Decimal::new(1250, 2)));
        assert_eq!(p.stock_value(), Decimal::new(5000, 2));
        assert_eq!(part(4, None, None).stock_value(), Decimal::ZERO);
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(part(1, Some(5), None).stock_label(), "Low Stock");
        assert_eq!(part(10, Some(5), None).stock_label(), "Active");
        let mut inactive = part(10, Some(5), None);
        inactive.is_active = false;
        assert_eq!(inactive.stock_label(), "Inactive");
    }
}
