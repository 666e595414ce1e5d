//! One log event per completed `/api` request, carrying a short preview of the JSON body.

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

const BODY_PREVIEW_CHARS: usize = 80;

/// Responses larger than this, or of unknown length, are logged without a preview.
const MAX_PREVIEW_SOURCE_BYTES: u64 = 64 * 1024;

/// Shorten to `max` characters, ending in an ellipsis when cut.
pub fn truncate_preview(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn previewable(response: &Response) -> bool {
    is_json(response)
        && response
            .body()
            .size_hint()
            .upper()
            .is_some_and(|n| n <= MAX_PREVIEW_SOURCE_BYTES)
}

pub async fn log_api_requests(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if !path.starts_with("/api") {
        return next.run(request).await;
    }
    let method = request.method().clone();
    let start = Instant::now();
    let response = next.run(request).await;
    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if !previewable(&response) {
        tracing::info!(%method, %path, status, duration_ms, "request completed");
        return response;
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, MAX_PREVIEW_SOURCE_BYTES as usize).await {
        Ok(bytes) => {
            let preview = truncate_preview(&String::from_utf8_lossy(&bytes), BODY_PREVIEW_CHARS);
            tracing::info!(%method, %path, status, duration_ms, body = %preview, "request completed");
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            tracing::warn!(%method, %path, status, duration_ms, error = %err, "response body unreadable");
            Response::from_parts(parts, Body::empty())
        }
    }
}
