//! Maintenance and warranty alerts

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::schedules::SchedulesService;
use crate::{
    error::AppResult,
    models::{equipment::Equipment, schedule::ScheduleDetails},
    repository::Repository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Overdue,
    Warranty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
}

/// A condition needing attention
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Alert {
    /// `overdue-<schedule id>` or `warranty-<equipment id>`
    pub id: String,
    pub alert_type: AlertType,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub equipment_id: Uuid,
    pub date: NaiveDate,
}

fn overdue_alert(details: &ScheduleDetails) -> Alert {
    let schedule = &details.schedule;
    let equipment = details.equipment_name.as_deref().unwrap_or("Unknown equipment");
    Alert {
        id: format!("overdue-{}", schedule.schedule_id),
        alert_type: AlertType::Overdue,
        title: format!("Overdue Maintenance: {}", equipment),
        description: format!(
            "{} is overdue since {}",
            schedule.maintenance_type, schedule.next_due
        ),
        severity: AlertSeverity::High,
        equipment_id: schedule.equipment_id,
        date: schedule.next_due,
    }
}

fn warranty_alert(equipment: &Equipment, expiry: NaiveDate) -> Alert {
    Alert {
        id: format!("warranty-{}", equipment.equipment_id),
        alert_type: AlertType::Warranty,
        title: format!("Warranty Expiring: {}", equipment.equipment_name),
        description: format!("Warranty expires on {}", expiry),
        severity: AlertSeverity::Medium,
        equipment_id: equipment.equipment_id,
        date: expiry,
    }
}

/// Overdue schedules first, then expiring warranties
fn build_alerts(overdue: &[ScheduleDetails], expiring: &[Equipment]) -> Vec<Alert> {
    let schedules = overdue.iter().map(overdue_alert);
    let warranties = expiring
        .iter()
        .filter_map(|e| e.warranty_expiry.map(|expiry| warranty_alert(e, expiry)));
    schedules.chain(warranties).collect()
}

#[derive(Clone)]
pub struct AlertsService {
    repository: Repository,
    schedules: SchedulesService,
}

impl AlertsService {
    pub fn new(repository: Repository, schedules: SchedulesService) -> Self {
        Self { repository, schedules }
    }

    /// Alerts as of `now`: overdue active schedules and warranties expiring
    /// within the due-soon window
    pub async fn list(&self, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let overdue = self.schedules.overdue(now).await?;

        let today = now.date_naive();
        let until = (now + self.schedules.due_soon_window()).date_naive();
        let expiring = self
            .repository
            .equipment
            .warranties_expiring(today, until)
            .await?;

        Ok(build_alerts(&overdue, &expiring))
    }
}
