//! Work order model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::{WorkOrderPriority, WorkOrderStatus, WorkOrderType};

/// Work order record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WorkOrder {
    pub workorder_id: Uuid,
    /// Human-facing number (WO-<unix millis>)
    pub workorder_number: String,
    pub equipment_id: Uuid,
    pub workorder_type: WorkOrderType,
    pub priority: WorkOrderPriority,
    pub requested_by: Option<String>,
    pub assigned_technician: Option<Uuid>,
    pub service_provider: Option<String>,
    pub problem_description: Option<String>,
    pub fault_code: Option<String>,
    pub request_date: DateTime<Utc>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub downtime_hours: Option<Decimal>,
    pub work_description: Option<String>,
    pub resolution: Option<String>,
    pub labor_hours: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub parts_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
    pub status: WorkOrderStatus,
    pub created_date: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub modified_by: Option<Uuid>,
    pub last_modified: DateTime<Utc>,
    /// Joined from inventory on listings
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_name: Option<String>,
}

/// Create work order request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWorkOrder {
    pub equipment_id: Uuid,
    pub workorder_type: WorkOrderType,
    pub priority: WorkOrderPriority,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub problem_description: String,
    #[validate(length(min = 2, message = "Requester name is required"))]
    pub requested_by: String,
    pub assigned_technician: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub fault_code: Option<String>,
}

/// Update work order request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkOrder {
    pub workorder_type: Option<WorkOrderType>,
    pub priority: Option<WorkOrderPriority>,
    pub status: Option<WorkOrderStatus>,
    pub assigned_technician: Option<Uuid>,
    pub service_provider: Option<String>,
    #[validate(length(min = 10))]
    pub problem_description: Option<String>,
    pub fault_code: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub downtime_hours: Option<Decimal>,
    pub work_description: Option<String>,
    pub resolution: Option<String>,
    pub labor_hours: Option<Decimal>,
    pub labor_cost: Option<Decimal>,
    pub parts_cost: Option<Decimal>,
    pub total_cost: Option<Decimal>,
}

/// Work order list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct WorkOrderQuery {
    pub status: Option<WorkOrderStatus>,
    pub equipment_id: Option<Uuid>,
    /// Case-insensitive match on number, description or equipment name
    pub search: Option<String>,
    pub limit: Option<i64>,
}
