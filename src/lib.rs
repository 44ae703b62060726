//! Radiology equipment maintenance tracking server
//!
//! REST JSON API for the equipment inventory of radiology departments:
//! preventive maintenance schedules with due-date evaluation, work orders,
//! spare parts, service directory, alerts and reports.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod maintenance;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
