//! Equipment service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment, created_by: Option<Uuid>) -> AppResult<Equipment> {
        let equipment = self.repository.equipment.create(data, created_by).await?;
        tracing::info!(equipment_id = %equipment.equipment_id, inventory_number = %equipment.inventory_number, "Equipment registered");
        Ok(equipment)
    }

    pub async fn update(
        &self,
        id: Uuid,
        data: &UpdateEquipment,
        modified_by: Option<Uuid>,
    ) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data, modified_by).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
