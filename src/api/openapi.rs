//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    alerts, auth, customers, dashboard, equipment, health, manufacturers, parts, reports,
    schedules, technicians, work_orders,
};

/// Registers the JWT bearer scheme referenced by `security(("bearer_auth" = []))`
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Radiology Server API",
        version = "1.0.0",
        description = "Radiology equipment maintenance tracking REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::logout,
        auth::me,
        auth::change_password,
        auth::create_user,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Schedules
        schedules::list_schedules,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::delete_schedule,
        schedules::complete_schedule,
        schedules::calendar,
        // Work orders
        work_orders::list_work_orders,
        work_orders::get_work_order,
        work_orders::create_work_order,
        work_orders::update_work_order,
        work_orders::delete_work_order,
        // Technicians
        technicians::list_technicians,
        technicians::get_technician,
        technicians::create_technician,
        technicians::update_technician,
        technicians::delete_technician,
        // Manufacturers
        manufacturers::list_manufacturers,
        manufacturers::get_manufacturer,
        manufacturers::create_manufacturer,
        manufacturers::update_manufacturer,
        manufacturers::delete_manufacturer,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::list_locations,
        customers::create_location,
        customers::update_location,
        customers::delete_location,
        // Parts
        parts::list_parts,
        parts::list_categories,
        parts::get_part,
        parts::create_part,
        parts::update_part,
        parts::delete_part,
        // Alerts, dashboard, reports
        alerts::list_alerts,
        dashboard::get_dashboard,
        reports::maintenance_history,
        reports::parts_usage,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::UserAccount,
            crate::models::user::SignUpRequest,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::ChangePasswordRequest,
            crate::models::user::CreateUserRequest,
            // Shared enums
            crate::models::enums::Frequency,
            crate::models::enums::EquipmentStatus,
            crate::models::enums::RiskLevel,
            crate::models::enums::WorkOrderType,
            crate::models::enums::WorkOrderPriority,
            crate::models::enums::WorkOrderStatus,
            crate::maintenance::DueStatus,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Schedules
            crate::models::schedule::MaintenanceSchedule,
            crate::models::schedule::ScheduleDetails,
            crate::models::schedule::CreateSchedule,
            crate::models::schedule::UpdateSchedule,
            crate::models::schedule::CompleteSchedule,
            // Work orders
            crate::models::work_order::WorkOrder,
            crate::models::work_order::CreateWorkOrder,
            crate::models::work_order::UpdateWorkOrder,
            // Directory
            crate::models::technician::Technician,
            crate::models::technician::CreateTechnician,
            crate::models::technician::UpdateTechnician,
            crate::models::manufacturer::Manufacturer,
            crate::models::manufacturer::CreateManufacturer,
            crate::models::manufacturer::UpdateManufacturer,
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            crate::models::customer::Location,
            crate::models::customer::CreateLocation,
            crate::models::customer::UpdateLocation,
            // Parts
            crate::models::part::Part,
            crate::models::part::CreatePart,
            crate::models::part::UpdatePart,
            // Alerts, dashboard, reports
            crate::services::alerts::Alert,
            crate::services::alerts::AlertType,
            crate::services::alerts::AlertSeverity,
            crate::services::dashboard::DashboardStats,
            crate::services::dashboard::StatusCount,
            crate::models::report::ReportFormat,
            crate::models::report::MaintenanceHistoryReport,
            crate::models::report::PartsUsageReport,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Accounts and sessions"),
        (name = "admin", description = "Account administration"),
        (name = "equipment", description = "Equipment inventory"),
        (name = "schedules", description = "Preventive maintenance schedules"),
        (name = "work-orders", description = "Work orders"),
        (name = "technicians", description = "Service technicians"),
        (name = "manufacturers", description = "Equipment manufacturers"),
        (name = "customers", description = "Customers and their locations"),
        (name = "parts", description = "Spare parts inventory"),
        (name = "alerts", description = "Overdue maintenance and warranty alerts"),
        (name = "dashboard", description = "Dashboard counters"),
        (name = "reports", description = "Maintenance and parts reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
