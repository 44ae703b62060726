//! Spare parts service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::part::{CreatePart, Part, PartQuery, UpdatePart},
    repository::Repository,
};

#[derive(Clone)]
pub struct PartsService {
    repository: Repository,
}

impl PartsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &PartQuery) -> AppResult<Vec<Part>> {
        self.repository.parts.list(query).await
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.repository.parts.categories().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Part> {
        self.repository.parts.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreatePart) -> AppResult<Part> {
        self.repository.parts.create(data).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdatePart) -> AppResult<Part> {
        self.repository.parts.update(id, data).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.parts.delete(id).await
    }
}
