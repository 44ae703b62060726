//! Report queries and payloads

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{part::Part, schedule::ScheduleDetails};

/// Output format of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceHistoryQuery {
    /// Earliest last-performed date (YYYY-MM-DD)
    pub start_date: Option<NaiveDate>,
    /// Latest last-performed date (YYYY-MM-DD)
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct PartsUsageQuery {
    pub category: Option<String>,
    #[serde(default)]
    pub format: ReportFormat,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceHistoryReport {
    pub total: usize,
    pub records: Vec<ScheduleDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PartsUsageReport {
    pub total_parts: usize,
    pub low_stock_count: usize,
    pub active_count: usize,
    /// Sum of current stock at unit cost
    pub total_value: Decimal,
    pub parts: Vec<Part>,
}

impl PartsUsageReport {
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            total_parts: parts.len(),
            low_stock_count: parts.iter().filter(|p| p.is_low_stock()).count(),
            active_count: parts.iter().filter(|p| p.is_active).count(),
            total_value: parts.iter().map(Part::stock_value).sum(),
            parts,
        }
    }
}
