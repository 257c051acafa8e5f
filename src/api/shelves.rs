//! Shelf management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::shelf::{CreateShelf, ShelfDetails, UpdateShelf},
};

use super::AuthenticatedUser;

/// List all shelves with occupancy figures
#[utoipa::path(
    get,
    path = "/shelves",
    tag = "shelves",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shelves", body = Vec<ShelfDetails>)
    )
)]
pub async fn list_shelves(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<ShelfDetails>>> {
    let shelves = state.services.shelves.list().await?;
    Ok(Json(shelves))
}

/// Create a new shelf
#[utoipa::path(
    post,
    path = "/shelves",
    tag = "shelves",
    security(("bearer_auth" = [])),
    request_body = CreateShelf,
    responses(
        (status = 201, description = "Shelf created", body = ShelfDetails),
        (status = 409, description = "Shelf code already exists")
    )
)]
pub async fn create_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateShelf>,
) -> AppResult<(StatusCode, Json<ShelfDetails>)> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let shelf = state.services.shelves.create(request).await?;
    Ok((StatusCode::CREATED, Json(shelf)))
}

/// Get a shelf by ID with occupancy figures
#[utoipa::path(
    get,
    path = "/shelves/{id}",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 200, description = "Shelf", body = ShelfDetails),
        (status = 404, description = "Shelf not found")
    )
)]
pub async fn get_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ShelfDetails>> {
    let shelf = state.services.shelves.get(id).await?;
    Ok(Json(shelf))
}

/// Update a shelf
#[utoipa::path(
    put,
    path = "/shelves/{id}",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shelf ID")),
    request_body = UpdateShelf,
    responses(
        (status = 200, description = "Shelf updated", body = ShelfDetails),
        (status = 404, description = "Shelf not found"),
        (status = 409, description = "Shelf code already exists")
    )
)]
pub async fn update_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateShelf>,
) -> AppResult<Json<ShelfDetails>> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let shelf = state.services.shelves.update(id, request).await?;
    Ok(Json(shelf))
}

/// Delete a shelf
#[utoipa::path(
    delete,
    path = "/shelves/{id}",
    tag = "shelves",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Shelf ID")),
    responses(
        (status = 204, description = "Shelf deleted"),
        (status = 404, description = "Shelf not found"),
        (status = 409, description = "Shelf still holds books")
    )
)]
pub async fn delete_shelf(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.shelves.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
