//! Activity endpoints. Creation forces status to "pending"; updates touch only status and observation.

use crate::error::AppError;
use crate::models::Activity;
use crate::response::{created, delete_target, json_body, no_content, parse_id};
use crate::schema::{Contract, ACTIVITIES};
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

const INVALID: &str = "Invalid activity data";
const NOT_FOUND: &str = "Activity not found";

#[utoipa::path(
    get,
    path = "/api/activities",
    tag = "activities",
    responses((status = 200, description = "OK", body = Vec<Activity>))
)]
pub async fn list_activities(State(state): State<AppState>) -> Result<Json<Vec<Activity>>, AppError> {
    let rows = state
        .repo
        .list_activities()
        .await
        .map_err(AppError::store("Failed to fetch activities"))?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/activities/date/{date}",
    tag = "activities",
    params(("date" = String, Path, description = "Exact realization date, e.g. 2024-05-01")),
    responses((status = 200, description = "OK", body = Vec<Activity>))
)]
pub async fn list_activities_by_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let rows = state
        .repo
        .list_activities_by_date(&date)
        .await
        .map_err(AppError::store("Failed to fetch activities by date"))?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    tag = "activities",
    params(("id" = i32, Path, description = "Activity id")),
    responses((status = 200, description = "OK", body = Activity), (status = 404, description = "Not found"))
)]
pub async fn get_activity(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Activity>, AppError> {
    let id = parse_id(&id)?;
    let row = state
        .repo
        .get_activity(id)
        .await
        .map_err(AppError::store("Failed to fetch activity"))?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/activities",
    tag = "activities",
    responses((status = 201, description = "Created", body = Activity), (status = 400, description = "Invalid body or id"))
)]
pub async fn create_activity(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(payload)?;
    let input = RequestValidator::validate(&Contract::insert(&ACTIVITIES), &body)
        .map_err(AppError::invalid(INVALID))?;
    let row = state
        .repo
        .create_activity(input)
        .await
        .map_err(AppError::store("Failed to create activity"))?;
    Ok(created(row))
}

#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    tag = "activities",
    params(("id" = i32, Path, description = "Activity id")),
    responses((status = 200, description = "OK", body = Activity), (status = 400, description = "Invalid body or id"), (status = 404, description = "Not found"))
)]
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Activity>, AppError> {
    let id = parse_id(&id)?;
    let body = json_body(payload)?;
    let input = RequestValidator::validate(&Contract::activity_status(), &body)
        .map_err(AppError::invalid(INVALID))?;
    let row = state
        .repo
        .update_activity(id, input)
        .await
        .map_err(AppError::store("Failed to update activity"))?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    tag = "activities",
    params(("id" = i32, Path, description = "Activity id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_activity(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, AppError> {
    let id = delete_target(&id, NOT_FOUND)?;
    let deleted = state
        .repo
        .delete_activity(id)
        .await
        .map_err(AppError::store("Failed to delete activity"))?;
    if deleted {
        Ok(no_content())
    } else {
        Err(AppError::NotFound(NOT_FOUND))
    }
}
