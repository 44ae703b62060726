//! Business logic services

pub mod alerts;
pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod equipment;
pub mod manufacturers;
pub mod parts;
pub mod reports;
pub mod schedules;
pub mod sessions;
pub mod technicians;
pub mod work_orders;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, MaintenanceConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub schedules: schedules::SchedulesService,
    pub work_orders: work_orders::WorkOrdersService,
    pub technicians: technicians::TechniciansService,
    pub manufacturers: manufacturers::ManufacturersService,
    pub customers: customers::CustomersService,
    pub parts: parts::PartsService,
    pub alerts: alerts::AlertsService,
    pub dashboard: dashboard::DashboardService,
    pub reports: reports::ReportsService,
    pub sessions: sessions::SessionStore,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        maintenance_config: &MaintenanceConfig,
        sessions: sessions::SessionStore,
    ) -> Self {
        let schedules = schedules::SchedulesService::new(
            Arc::new(repository.schedules.clone()),
            maintenance_config.due_soon_days,
        );

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, sessions.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            work_orders: work_orders::WorkOrdersService::new(repository.clone()),
            technicians: technicians::TechniciansService::new(repository.clone()),
            manufacturers: manufacturers::ManufacturersService::new(repository.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            parts: parts::PartsService::new(repository.clone()),
            alerts: alerts::AlertsService::new(repository.clone(), schedules.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone(), schedules.clone()),
            reports: reports::ReportsService::new(repository.clone(), schedules.clone()),
            schedules,
            sessions,
            repository,
        }
    }

    /// Check the database and the session store are reachable
    pub async fn ready(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await?;
        self.sessions.ping().await
    }
}
