//! Process settings from the environment (`.env` is loaded by the binary before this runs).

use crate::error::SettingsError;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Fixed listening port.
pub const PORT: u16 = 5000;

const DEFAULT_STATIC_DIR: &str = "dist/public";
const DEFAULT_CLIENT_DIR: &str = "client";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEnv {
    /// Client sources served from disk with a fresh cache-busting entry page per request.
    Development,
    /// Pre-built bundle with single-page fallback.
    Production,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub app_env: AppEnv,
    pub static_dir: PathBuf,
    pub client_dir: PathBuf,
    pub db_max_connections: u32,
    /// Shut the server down after answering a request whose handler panicked.
    pub fail_fast: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;

        let app_env = match lookup("APP_ENV").as_deref().map(str::trim) {
            None | Some("") | Some("development") => AppEnv::Development,
            Some("production") => AppEnv::Production,
            Some(other) => {
                return Err(SettingsError::Invalid {
                    name: "APP_ENV",
                    value: other.to_string(),
                })
            }
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(SettingsError::Invalid {
                    name: "DB_MAX_CONNECTIONS",
                    value: v.clone(),
                })?,
        };

        let fail_fast = match lookup("FAIL_FAST").as_deref().map(str::trim) {
            None | Some("") => true,
            Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => {
                return Err(SettingsError::Invalid {
                    name: "FAIL_FAST",
                    value: other.to_string(),
                })
            }
        };

        Ok(Settings {
            database_url,
            app_env,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            client_dir: lookup("CLIENT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIENT_DIR)),
            db_max_connections,
            fail_fast,
        })
    }

    /// All interfaces, fixed port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT))
    }
}
