//! Technician API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::technician::{CreateTechnician, Technician, UpdateTechnician},
    AppState,
};

use super::AuthenticatedUser;

/// List technicians
#[utoipa::path(
    get,
    path = "/technicians",
    tag = "technicians",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Technicians", body = Vec<Technician>)
    )
)]
pub async fn list_technicians(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
) -> AppResult<Json<Vec<Technician>>> {
    let technicians = state.services.technicians.list().await?;
    Ok(Json(technicians))
}

/// Get a technician
#[utoipa::path(
    get,
    path = "/technicians/{id}",
    tag = "technicians",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Technician ID")),
    responses(
        (status = 200, description = "Technician", body = Technician)
    )
)]
pub async fn get_technician(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Technician>> {
    let technician = state.services.technicians.get_by_id(id).await?;
    Ok(Json(technician))
}

/// Create a technician
#[utoipa::path(
    post,
    path = "/technicians",
    tag = "technicians",
    security(("bearer_auth" = [])),
    request_body = CreateTechnician,
    responses(
        (status = 201, description = "Technician created", body = Technician)
    )
)]
pub async fn create_technician(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Json(data): Json<CreateTechnician>,
) -> AppResult<(StatusCode, Json<Technician>)> {
    data.validate()?;
    let technician = state.services.technicians.create(&data).await?;
    Ok((StatusCode::CREATED, Json(technician)))
}

/// Update a technician
#[utoipa::path(
    put,
    path = "/technicians/{id}",
    tag = "technicians",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Technician ID")),
    request_body = UpdateTechnician,
    responses(
        (status = 200, description = "Technician updated", body = Technician)
    )
)]
pub async fn update_technician(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateTechnician>,
) -> AppResult<Json<Technician>> {
    data.validate()?;
    let technician = state.services.technicians.update(id, &data).await?;
    Ok(Json(technician))
}

/// Delete a technician
#[utoipa::path(
    delete,
    path = "/technicians/{id}",
    tag = "technicians",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Technician ID")),
    responses(
        (status = 204, description = "Technician deleted")
    )
)]
pub async fn delete_technician(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.technicians.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
