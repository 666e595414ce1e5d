//! Cronograma: a course schedule planner backend. Curricular components, holidays and
//! activities over a declaration-driven PostgreSQL store, served as a JSON API alongside
//! the browser client.

pub mod client;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;

pub use error::{AppError, SettingsError, StoreError, ValidationErrors};
pub use middleware::FaultSignal;
pub use migration::ensure_tables;
pub use routes::router;
pub use settings::Settings;
pub use state::AppState;
pub use store::{MemoryRepository, PgRepository, Repository};

use axum::Router;

/// The full API router with its layers, without the client fallback.
pub fn app(state: AppState, fault: Option<FaultSignal>) -> Router {
    middleware::apply(router(state), fault)
}
