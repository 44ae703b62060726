//! Technicians service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::technician::{CreateTechnician, Technician, UpdateTechnician},
    repository::Repository,
};

#[derive(Clone)]
pub struct TechniciansService {
    repository: Repository,
}

impl TechniciansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Technician>> {
        self.repository.technicians.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Technician> {
        self.repository.technicians.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateTechnician) -> AppResult<Technician> {
        self.repository.technicians.create(data).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTechnician) -> AppResult<Technician> {
        self.repository.technicians.update(id, data).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.technicians.delete(id).await
    }
}
