//! Manufacturers service

use crate::{
    error::AppResult,
    models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer},
    repository::Repository,
};

#[derive(Clone)]
pub struct ManufacturersService {
    repository: Repository,
}

impl ManufacturersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Manufacturer>> {
        self.repository.manufacturers.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Manufacturer> {
        self.repository.manufacturers.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateManufacturer) -> AppResult<Manufacturer> {
        self.repository.manufacturers.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateManufacturer) -> AppResult<Manufacturer> {
        self.repository.manufacturers.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.manufacturers.delete(id).await
    }
}
