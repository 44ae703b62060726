//! Customers service (customers and their locations)

use crate::{
    error::AppResult,
    models::customer::{
        CreateCustomer, CreateLocation, Customer, Location, UpdateCustomer, UpdateLocation,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Customers ----
    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        self.repository.customers.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCustomer) -> AppResult<Customer> {
        self.repository.customers.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateCustomer) -> AppResult<Customer> {
        self.repository.customers.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete(id).await
    }

    // ---- Locations ----
    pub async fn list_locations(&self, customer_id: i32) -> AppResult<Vec<Location>> {
        // 404 for an unknown customer rather than an empty list
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.customers.list_locations(customer_id).await
    }

    pub async fn create_location(&self, customer_id: i32, data: &CreateLocation) -> AppResult<Location> {
        self.repository.customers.get_by_id(customer_id).await?;
        self.repository.customers.create_location(customer_id, data).await
    }

    pub async fn update_location(&self, id: i32, data: &UpdateLocation) -> AppResult<Location> {
        self.repository.customers.update_location(id, data).await
    }

    pub async fn delete_location(&self, id: i32) -> AppResult<()> {
        self.repository.customers.delete_location(id).await
    }
}
