//! Manufacturer API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::manufacturer::{CreateManufacturer, Manufacturer, UpdateManufacturer},
    AppState,
};

use super::AuthenticatedUser;

/// List manufacturers
#[utoipa::path(
    get,
    path = "/manufacturers",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Manufacturers", body = Vec<Manufacturer>)
    )
)]
pub async fn list_manufacturers(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
) -> AppResult<Json<Vec<Manufacturer>>> {
    let manufacturers = state.services.manufacturers.list().await?;
    Ok(Json(manufacturers))
}

/// Get a manufacturer
#[utoipa::path(
    get,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Manufacturer", body = Manufacturer)
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Manufacturer>> {
    let manufacturer = state.services.manufacturers.get_by_id(id).await?;
    Ok(Json(manufacturer))
}

/// Create a manufacturer
#[utoipa::path(
    post,
    path = "/manufacturers",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    request_body = CreateManufacturer,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer)
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Json(data): Json<CreateManufacturer>,
) -> AppResult<(StatusCode, Json<Manufacturer>)> {
    data.validate()?;
    let manufacturer = state.services.manufacturers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(manufacturer)))
}

/// Update a manufacturer
#[utoipa::path(
    put,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer ID")),
    request_body = UpdateManufacturer,
    responses(
        (status = 200, description = "Manufacturer updated", body = Manufacturer)
    )
)]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateManufacturer>,
) -> AppResult<Json<Manufacturer>> {
    data.validate()?;
    let manufacturer = state.services.manufacturers.update(id, &data).await?;
    Ok(Json(manufacturer))
}

/// Delete a manufacturer
#[utoipa::path(
    delete,
    path = "/manufacturers/{id}",
    tag = "manufacturers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Manufacturer ID")),
    responses(
        (status = 204, description = "Manufacturer deleted")
    )
)]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.manufacturers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
