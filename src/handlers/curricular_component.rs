//! Curricular component endpoints: list, read, create, partial update, delete.

use crate::error::AppError;
use crate::models::CurricularComponent;
use crate::response::{created, delete_target, json_body, no_content, parse_id};
use crate::schema::{Contract, CURRICULAR_COMPONENTS};
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

const INVALID: &str = "Invalid component data";
const NOT_FOUND: &str = "Component not found";

#[utoipa::path(
    get,
    path = "/api/curricular-components",
    tag = "curricular-components",
    responses((status = 200, description = "OK", body = Vec<CurricularComponent>))
)]
pub async fn list_components(State(state): State<AppState>) -> Result<Json<Vec<CurricularComponent>>, AppError> {
    let rows = state
        .repo
        .list_curricular_components()
        .await
        .map_err(AppError::store("Failed to fetch curricular components"))?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/api/curricular-components/{id}",
    tag = "curricular-components",
    params(("id" = i32, Path, description = "Component id")),
    responses((status = 200, description = "OK", body = CurricularComponent), (status = 404, description = "Not found"))
)]
pub async fn get_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CurricularComponent>, AppError> {
    let id = parse_id(&id)?;
    let row = state
        .repo
        .get_curricular_component(id)
        .await
        .map_err(AppError::store("Failed to fetch curricular component"))?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(Json(row))
}

#[utoipa::path(
    post,
    path = "/api/curricular-components",
    tag = "curricular-components",
    responses((status = 201, description = "Created", body = CurricularComponent), (status = 400, description = "Invalid body or id"))
)]
pub async fn create_component(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let body = json_body(payload)?;
    let input = RequestValidator::validate(&Contract::insert(&CURRICULAR_COMPONENTS), &body)
        .map_err(AppError::invalid(INVALID))?;
    let row = state
        .repo
        .create_curricular_component(input)
        .await
        .map_err(AppError::store("Failed to create curricular component"))?;
    Ok(created(row))
}

#[utoipa::path(
    put,
    path = "/api/curricular-components/{id}",
    tag = "curricular-components",
    params(("id" = i32, Path, description = "Component id")),
    responses((status = 200, description = "OK", body = CurricularComponent), (status = 400, description = "Invalid body or id"), (status = 404, description = "Not found"))
)]
pub async fn update_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CurricularComponent>, AppError> {
    let id = parse_id(&id)?;
    let body = json_body(payload)?;
    let input = RequestValidator::validate(&Contract::partial(&CURRICULAR_COMPONENTS), &body)
        .map_err(AppError::invalid(INVALID))?;
    let row = state
        .repo
        .update_curricular_component(id, input)
        .await
        .map_err(AppError::store("Failed to update curricular component"))?
        .ok_or(AppError::NotFound(NOT_FOUND))?;
    Ok(Json(row))
}

#[utoipa::path(
    delete,
    path = "/api/curricular-components/{id}",
    tag = "curricular-components",
    params(("id" = i32, Path, description = "Component id")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_component(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = delete_target(&id, NOT_FOUND)?;
    let deleted = state
        .repo
        .delete_curricular_component(id)
        .await
        .map_err(AppError::store("Failed to delete curricular component"))?;
    if deleted {
        Ok(no_content())
    } else {
        Err(AppError::NotFound(NOT_FOUND))
    }
}
