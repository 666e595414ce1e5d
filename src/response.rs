//! Small response and request helpers shared by the handlers.

use crate::error::AppError;
use axum::extract::rejection::JsonRejection;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Unwrap a JSON body, turning malformed or non-JSON payloads into a 400.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload
        .map(|Json(v)| v)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Path ids are store-assigned integers.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", raw)))
}

/// DELETE ids: a segment that cannot name a stored row answers like any other missing row.
pub fn delete_target(raw: &str, not_found: &'static str) -> Result<i32, AppError> {
    raw.trim().parse::<i32>().map_err(|_| AppError::NotFound(not_found))
}
