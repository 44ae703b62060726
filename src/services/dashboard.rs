//! Dashboard statistics

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::schedules::SchedulesService;
use crate::{
    error::AppResult,
    models::{
        enums::EquipmentStatus,
        work_order::{WorkOrder, WorkOrderQuery},
    },
    repository::Repository,
};

const RECENT_WORK_ORDERS: i64 = 5;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCount {
    pub status: EquipmentStatus,
    pub count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub active_equipment: i64,
    /// Work orders Open or In Progress
    pub open_work_orders: i64,
    pub overdue_schedules: i64,
    pub low_stock_parts: i64,
    pub recent_work_orders: Vec<WorkOrder>,
    pub equipment_by_status: Vec<StatusCount>,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
    schedules: SchedulesService,
}

impl DashboardService {
    pub fn new(repository: Repository, schedules: SchedulesService) -> Self {
        Self { repository, schedules }
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> AppResult<DashboardStats> {
        let (active_equipment, open_work_orders, overdue_schedules, low_stock_parts) = tokio::try_join!(
            self.repository.equipment.count_with_status(EquipmentStatus::Active),
            self.repository.work_orders.count_open(),
            self.schedules.count_overdue(now),
            self.repository.parts.count_low_stock(),
        )?;

        let recent_work_orders = self
            .repository
            .work_orders
            .list(&WorkOrderQuery {
                limit: Some(RECENT_WORK_ORDERS),
                ..Default::default()
            })
            .await?;

        let equipment_by_status = self
            .repository
            .equipment
            .count_by_status()
            .await?
            .into_iter()
            .map(|(status, count)| StatusCount { status, count })
            .collect();

        Ok(DashboardStats {
            active_equipment,
            open_work_orders,
            overdue_schedules,
            low_stock_parts,
            recent_work_orders,
            equipment_by_status,
        })
    }
}
