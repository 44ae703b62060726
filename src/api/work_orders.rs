//! Work order API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::work_order::{CreateWorkOrder, UpdateWorkOrder, WorkOrder, WorkOrderQuery},
    AppState,
};

use super::AuthenticatedUser;

/// List work orders, most recent first
#[utoipa::path(
    get,
    path = "/work-orders",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(WorkOrderQuery),
    responses(
        (status = 200, description = "Work orders", body = Vec<WorkOrder>)
    )
)]
pub async fn list_work_orders(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<WorkOrderQuery>,
) -> AppResult<Json<Vec<WorkOrder>>> {
    let orders = state.services.work_orders.list(&query).await?;
    Ok(Json(orders))
}

/// Get a work order
#[utoipa::path(
    get,
    path = "/work-orders/{id}",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Work order", body = WorkOrder),
        (status = 404, description = "Work order not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_work_order(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<WorkOrder>> {
    let order = state.services.work_orders.get_by_id(id).await?;
    Ok(Json(order))
}

/// Open a work order
#[utoipa::path(
    post,
    path = "/work-orders",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    request_body = CreateWorkOrder,
    responses(
        (status = 201, description = "Work order created", body = WorkOrder),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_work_order(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateWorkOrder>,
) -> AppResult<(StatusCode, Json<WorkOrder>)> {
    data.validate()?;
    let order = state
        .services
        .work_orders
        .create(&data, Some(session.user_id))
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Update a work order
#[utoipa::path(
    put,
    path = "/work-orders/{id}",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Work order ID")),
    request_body = UpdateWorkOrder,
    responses(
        (status = 200, description = "Work order updated", body = WorkOrder)
    )
)]
pub async fn update_work_order(
    State(state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateWorkOrder>,
) -> AppResult<Json<WorkOrder>> {
    data.validate()?;
    let order = state
        .services
        .work_orders
        .update(id, data, Some(session.user_id))
        .await?;
    Ok(Json(order))
}

/// Delete a work order
#[utoipa::path(
    delete,
    path = "/work-orders/{id}",
    tag = "work-orders",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Work order ID")),
    responses(
        (status = 204, description = "Work order deleted")
    )
)]
pub async fn delete_work_order(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.work_orders.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
