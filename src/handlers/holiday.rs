//! Holiday endpoints. Holidays are never updated, only created and deleted.

use crate::error::AppError;
use crate::models::Holiday;
use crate::response::{created, delete_target, json_body, no_content, parse_id};
use crate::schema::{Contract, HOLIDAYS};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

const NOT_FOUND: &str = "Holiday not found";

#[utoipa::path(
    get,
    path = "/api/holidays",
    tag = "holidays",
    responses((status = 200, description = "OK", body = Vec<Holiday>))
)]
pub async fn list_holidays(State(state): State<AppState>) -> Result<Json<Vec<Holiday>>, AppError> {
    let rows = state
        .repo
        .list_holidays()
        .await
        .map_err(AppError::store("Failed to fetch holidays"))?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/holidays/{id}",
    tag = "holidays",
    params(("id" = i32, Path, description = "Holiday id")),
    responses((status = 200, description = "OK", body = Holiday), (status = 404, description = "Not found"))
)]
pub async fn get_holiday(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Holiday>, AppError> {
    let id = parse_id(&id)?;
    let row = state
        .repo
        .get_holiday(id)
        .await
        .map_err(AppError::store("Failed to fetch holiday"))?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/holidays",
    tag = "holidays",
    responses((status = 201, description = "Created", body = Holiday), (status = 400, description = "Invalid body or id"))
)]
pub async fn create_holiday(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(payload)?;
    let input = RequestValidator::validate(&Contract::insert(&HOLIDAYS), &body)
        .map_err(AppError::invalid("Invalid holiday data"))?;
    let row = state
        .repo
        .create_holiday(input)
        .await
        .map_err(AppError::store("Failed to create holiday"))?;
    Ok(created(row))
}

#[utoipa::path(
    delete,
    path = "/api/holidays/{id}",
    tag = "holidays",
    params(("id" = i32, Path, description = "Holiday id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_holiday(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, AppError> {
    let id = delete_target(&id, NOT_FOUND)?;
    let deleted = state
        .repo
        .delete_holiday(id)
        .await
        .map_err(AppError::store("Failed to delete holiday"))?;
    if deleted {
        Ok(no_content())
    } else {
        Err(AppError::NotFound(NOT_FOUND))
    }
}
