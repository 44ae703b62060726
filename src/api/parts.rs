//! Spare part API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    models::part::{CreatePart, Part, PartQuery, UpdatePart},
    AppState,
};

use super::AuthenticatedUser;

/// List parts
#[utoipa::path(
    get,
    path = "/parts",
    tag = "parts",
    security(("bearer_auth" = [])),
    params(PartQuery),
    responses(
        (status = 200, description = "Parts", body = Vec<Part>)
    )
)]
pub async fn list_parts(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Query(query): Query<PartQuery>,
) -> AppResult<Json<Vec<Part>>> {
    let parts = state.services.parts.list(&query).await?;
    Ok(Json(parts))
}

/// Distinct part categories
#[utoipa::path(
    get,
    path = "/parts/categories",
    tag = "parts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category names in use", body = Vec<String>)
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
) -> AppResult<Json<Vec<String>>> {
    let categories = state.services.parts.categories().await?;
    Ok(Json(categories))
}

/// Get a part
#[utoipa::path(
    get,
    path = "/parts/{id}",
    tag = "parts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Part ID")),
    responses(
        (status = 200, description = "Part", body = Part),
        (status = 404, description = "Part not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_part(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Part>> {
    let part = state.services.parts.get_by_id(id).await?;
    Ok(Json(part))
}

/// Create a part
#[utoipa::path(
    post,
    path = "/parts",
    tag = "parts",
    security(("bearer_auth" = [])),
    request_body = CreatePart,
    responses(
        (status = 201, description = "Part created", body = Part),
        (status = 409, description = "Part number already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_part(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Json(data): Json<CreatePart>,
) -> AppResult<(StatusCode, Json<Part>)> {
    data.validate()?;
    let part = state.services.parts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(part)))
}

/// Update a part
#[utoipa::path(
    put,
    path = "/parts/{id}",
    tag = "parts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Part ID")),
    request_body = UpdatePart,
    responses(
        (status = 200, description = "Part updated", body = Part)
    )
)]
pub async fn update_part(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdatePart>,
) -> AppResult<Json<Part>> {
    data.validate()?;
    let part = state.services.parts.update(id, &data).await?;
    Ok(Json(part))
}

/// Delete a part
#[utoipa::path(
    delete,
    path = "/parts/{id}",
    tag = "parts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Part ID")),
    responses(
        (status = 204, description = "Part deleted")
    )
)]
pub async fn delete_part(
    State(state): State<AppState>,
    AuthenticatedUser(_session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.parts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
