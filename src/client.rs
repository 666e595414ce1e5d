//! Serving the browser client next to the API.
//!
//! Development reads the entry page from the client source tree on every request and stamps
//! the entry script with a fresh version so the browser never reuses a stale module graph.
//! Production serves the pre-built bundle and answers unknown paths with its `index.html`.

use crate::error::{ErrorBody, SettingsError};
use crate::settings::{AppEnv, Settings};
use axum::{
    extract::State,
    handler::Handler,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json, Router,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};

const ENTRY_SCRIPT: &str = r#"src="/src/main\.tsx(\?v=[^"]*)?""#;

/// Point the entry script at `/src/main.tsx?v=<version>`.
pub fn stamp_entry_script(html: &str, version: &str) -> Result<String, regex::Error> {
    let re = Regex::new(ENTRY_SCRIPT)?;
    Ok(re
        .replace_all(html, format!(r#"src="/src/main.tsx?v={version}""#).as_str())
        .into_owned())
}

#[derive(Clone)]
struct DevClient {
    index: Arc<PathBuf>,
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::message("Internal Server Error")),
    )
        .into_response()
}

async fn dev_index(State(client): State<DevClient>) -> Response {
    let html = match tokio::fs::read_to_string(client.index.as_path()).await {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(path = %client.index.display(), error = %err, "could not read client entry page");
            return internal_error();
        }
    };
    let version = uuid::Uuid::new_v4().simple().to_string();
    match stamp_entry_script(&html, &version) {
        Ok(page) => Html(page).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "could not stamp client entry page");
            internal_error()
        }
    }
}

/// Production startup check: the bundle must exist before the server accepts traffic.
pub fn ensure_static_dir(dir: &Path) -> Result<(), SettingsError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(SettingsError::MissingStaticDir(dir.to_path_buf()))
    }
}

fn development(router: Router, client_dir: &Path) -> Router {
    let index = dev_index.with_state(DevClient {
        index: Arc::new(client_dir.join("index.html")),
    });
    // Directory requests ("/") must reach the stamped page, not the raw file.
    let files = ServeDir::new(client_dir)
        .append_index_html_on_directories(false)
        .fallback(index);
    router.fallback_service(files)
}

fn production(router: Router, static_dir: &Path) -> Result<Router, SettingsError> {
    ensure_static_dir(static_dir)?;
    let files = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    Ok(router.fallback_service(files))
}

/// Install the client as the router's fallback for everything the API does not claim.
pub fn mount(router: Router, settings: &Settings) -> Result<Router, SettingsError> {
    match settings.app_env {
        AppEnv::Development => {
            tracing::info!(dir = %settings.client_dir.display(), "serving client sources (development)");
            Ok(development(router, &settings.client_dir))
        }
        AppEnv::Production => {
            tracing::info!(dir = %settings.static_dir.display(), "serving client bundle");
            production(router, &settings.static_dir)
        }
    }
}
