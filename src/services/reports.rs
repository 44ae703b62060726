//! Maintenance history and parts usage reports, with CSV export

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::schedules::SchedulesService;
use crate::{
    error::{AppError, AppResult},
    models::{
        part::{Part, PartQuery},
        report::{
            MaintenanceHistoryQuery, MaintenanceHistoryReport, PartsUsageQuery, PartsUsageReport,
        },
        schedule::ScheduleDetails,
    },
    repository::Repository,
};

const HISTORY_COLUMNS: [&str; 6] = [
    "Equipment",
    "Maintenance Type",
    "Frequency",
    "Last Performed",
    "Next Due",
    "Status",
];

const PARTS_COLUMNS: [&str; 10] = [
    "Part Number",
    "Part Name",
    "Manufacturer",
    "Category",
    "Current Stock",
    "Minimum Stock",
    "Unit Cost",
    "Total Value",
    "Storage Location",
    "Status",
];

fn csv_error(e: impl std::fmt::Display) -> AppError {
    AppError::Internal(format!("CSV write error: {}", e))
}

/// Render a header row and records; every field quoted, `\n` line endings
fn write_csv<I>(header: &[&str], records: I) -> AppResult<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(header).map_err(csv_error)?;
    for record in records {
        wtr.write_record(&record).map_err(csv_error)?;
    }

    let bytes = wtr.into_inner().map_err(csv_error)?;
    String::from_utf8(bytes).map_err(csv_error)
}

fn or_empty<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub fn maintenance_history_csv(records: &[ScheduleDetails]) -> AppResult<String> {
    write_csv(
        &HISTORY_COLUMNS,
        records.iter().map(|d| {
            vec![
                d.equipment_name.clone().unwrap_or_default(),
                d.schedule.maintenance_type.clone(),
                d.schedule.frequency.to_string(),
                or_empty(d.schedule.last_performed),
                d.schedule.next_due.to_string(),
                d.status.label().to_string(),
            ]
        }),
    )
}

pub fn parts_usage_csv(parts: &[Part]) -> AppResult<String> {
    write_csv(
        &PARTS_COLUMNS,
        parts.iter().map(|p| {
            vec![
                p.part_number.clone(),
                p.part_name.clone(),
                p.manufacturer_name.clone().unwrap_or_default(),
                p.category.clone().unwrap_or_default(),
                p.current_stock.to_string(),
                or_empty(p.minimum_stock),
                or_empty(p.unit_cost),
                p.stock_value().to_string(),
                p.storage_location.clone().unwrap_or_default(),
                p.stock_label().to_string(),
            ]
        }),
    )
}

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
    schedules: SchedulesService,
}

impl ReportsService {
    pub fn new(repository: Repository, schedules: SchedulesService) -> Self {
        Self { repository, schedules }
    }

    pub async fn maintenance_history(
        &self,
        query: &MaintenanceHistoryQuery,
        now: DateTime<Utc>,
    ) -> AppResult<MaintenanceHistoryReport> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(AppError::BadRequest("start_date must not be after end_date".to_string()));
            }
        }
        let records = self
            .schedules
            .history(query.start_date, query.end_date, now)
            .await?;
        Ok(MaintenanceHistoryReport {
            total: records.len(),
            records,
        })
    }

    pub async fn parts_usage(&self, query: &PartsUsageQuery) -> AppResult<PartsUsageReport> {
        let parts = self
            .repository
            .parts
            .list(&PartQuery {
                category: query.category.clone(),
                low_stock: None,
            })
            .await?;
        Ok(PartsUsageReport::from_parts(parts))
    }
}
