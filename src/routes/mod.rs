//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;

/// Every server route: `/health`, `/ready`, `/version` and the `/api` tree. No layers, no client.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
}
