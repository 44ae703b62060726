//! Data models for the radiology maintenance server

pub mod customer;
pub mod enums;
pub mod equipment;
pub mod manufacturer;
pub mod part;
pub mod report;
pub mod schedule;
pub mod technician;
pub mod user;
pub mod work_order;

// Re-export commonly used types
pub use customer::{Customer, Location};
pub use enums::{EquipmentStatus, Frequency, RiskLevel, WorkOrderPriority, WorkOrderStatus, WorkOrderType};
pub use equipment::Equipment;
pub use manufacturer::Manufacturer;
pub use part::Part;
pub use schedule::{MaintenanceSchedule, ScheduleDetails};
pub use technician::Technician;
pub use user::{Session, UserAccount};
pub use work_order::WorkOrder;
