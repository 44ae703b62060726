//! Radiology Server
//!
//! REST API server for radiology equipment maintenance tracking.

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use radiology_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{sessions::SessionStore, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("radiology_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Radiology Server v{}", env!("CARGO_PKG_VERSION"));

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let sessions = SessionStore::connect(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;

    tracing::info!("Connected to Redis");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let services = Services::new(
        Repository::new(pool),
        config.auth.clone(),
        &config.maintenance,
        sessions,
    );

    tracing::info!(
        due_soon_days = config.maintenance.due_soon_days,
        "Maintenance due-soon window configured"
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/signup", post(api::auth::signup))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/me", get(api::auth::me))
        .route("/auth/password", put(api::auth::change_password))
        .route("/admin/users", post(api::auth::create_user))
        // Equipment
        .route(
            "/equipment",
            get(api::equipment::list_equipment).post(api::equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(api::equipment::get_equipment)
                .put(api::equipment::update_equipment)
                .delete(api::equipment::delete_equipment),
        )
        // Maintenance schedules
        .route(
            "/schedules",
            get(api::schedules::list_schedules).post(api::schedules::create_schedule),
        )
        .route("/schedules/calendar", get(api::schedules::calendar))
        .route(
            "/schedules/:id",
            get(api::schedules::get_schedule)
                .put(api::schedules::update_schedule)
                .delete(api::schedules::delete_schedule),
        )
        .route("/schedules/:id/complete", post(api::schedules::complete_schedule))
        // Work orders
        .route(
            "/work-orders",
            get(api::work_orders::list_work_orders).post(api::work_orders::create_work_order),
        )
        .route(
            "/work-orders/:id",
            get(api::work_orders::get_work_order)
                .put(api::work_orders::update_work_order)
                .delete(api::work_orders::delete_work_order),
        )
        // Technicians
        .route(
            "/technicians",
            get(api::technicians::list_technicians).post(api::technicians::create_technician),
        )
        .route(
            "/technicians/:id",
            get(api::technicians::get_technician)
                .put(api::technicians::update_technician)
                .delete(api::technicians::delete_technician),
        )
        // Manufacturers
        .route(
            "/manufacturers",
            get(api::manufacturers::list_manufacturers)
                .post(api::manufacturers::create_manufacturer),
        )
        .route(
            "/manufacturers/:id",
            get(api::manufacturers::get_manufacturer)
                .put(api::manufacturers::update_manufacturer)
                .delete(api::manufacturers::delete_manufacturer),
        )
        // Customers and locations
        .route(
            "/customers",
            get(api::customers::list_customers).post(api::customers::create_customer),
        )
        .route(
            "/customers/:id",
            get(api::customers::get_customer)
                .put(api::customers::update_customer)
                .delete(api::customers::delete_customer),
        )
        .route(
            "/customers/:id/locations",
            get(api::customers::list_locations).post(api::customers::create_location),
        )
        .route(
            "/locations/:id",
            put(api::customers::update_location).delete(api::customers::delete_location),
        )
        // Parts
        .route("/parts", get(api::parts::list_parts).post(api::parts::create_part))
        .route("/parts/categories", get(api::parts::list_categories))
        .route(
            "/parts/:id",
            get(api::parts::get_part)
                .put(api::parts::update_part)
                .delete(api::parts::delete_part),
        )
        // Alerts, dashboard and reports
        .route("/alerts", get(api::alerts::list_alerts))
        .route("/dashboard", get(api::dashboard::get_dashboard))
        .route(
            "/reports/maintenance-history",
            get(api::reports::maintenance_history),
        )
        .route("/reports/parts-usage", get(api::reports::parts_usage))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
