//! Work orders service

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        enums::WorkOrderStatus,
        work_order::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderQuery},
    },
    repository::Repository,
};

/// Human-facing work order number
pub fn workorder_number(at: DateTime<Utc>) -> String {
    format!("WO-{}", at.timestamp_millis())
}

/// Fill the fields an update implies but did not set: the total cost when
/// either cost component changes, and the completion date when the order
/// is marked completed.
fn with_derived_fields(current: &WorkOrder, mut update: UpdateWorkOrder, now: DateTime<Utc>) -> UpdateWorkOrder {
    if update.total_cost.is_none() && (update.labor_cost.is_some() || update.parts_cost.is_some()) {
        let labor = update.labor_cost.or(current.labor_cost).unwrap_or_default();
        let parts = update.parts_cost.or(current.parts_cost).unwrap_or_default();
        update.total_cost = Some(labor + parts);
    }

    if update.status == Some(WorkOrderStatus::Completed)
        && update.completion_date.is_none()
        && current.completion_date.is_none()
    {
        update.completion_date = Some(now);
    }

    update
}

#[derive(Clone)]
pub struct WorkOrdersService {
    repository: Repository,
}

impl WorkOrdersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &WorkOrderQuery) -> AppResult<Vec<WorkOrder>> {
        self.repository.work_orders.list(query).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<WorkOrder> {
        self.repository.work_orders.get_by_id(id).await
    }

    /// Open a new work order
    pub async fn create(&self, data: &CreateWorkOrder, created_by: Option<Uuid>) -> AppResult<WorkOrder> {
        // Unknown equipment is a 404, not a constraint error
        self.repository.equipment.get_by_id(data.equipment_id).await?;

        let number = workorder_number(Utc::now());
        let order = self.repository.work_orders.create(data, &number, created_by).await?;

        tracing::info!(
            workorder_id = %order.workorder_id,
            workorder_number = %order.workorder_number,
            equipment_id = %order.equipment_id,
            priority = %order.priority,
            "Work order created"
        );
        Ok(order)
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: UpdateWorkOrder,
        modified_by: Option<Uuid>,
    ) -> AppResult<WorkOrder> {
        let current = self.repository.work_orders.get_by_id(id).await?;
        let data = with_derived_fields(&current, data, Utc::now());
        self.repository.work_orders.update(id, &data, modified_by).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.work_orders.delete(id).await
    }
}
