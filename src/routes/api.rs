//! The `/api` surface. Paths here are relative to the `/api` nest.

use crate::handlers::{
    create_activity, create_component, create_holiday, delete_activity, delete_component,
    delete_holiday, get_activity, get_component, get_holiday, list_activities,
    list_activities_by_date, list_components, list_holidays, update_activity, update_component,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/curricular-components", get(list_components).post(create_component))
        .route(
            "/curricular-components/:id",
            get(get_component).put(update_component).delete(delete_component),
        )
        .route("/holidays", get(list_holidays).post(create_holiday))
        .route("/holidays/:id", get(get_holiday).delete(delete_holiday))
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/date/:date", get(list_activities_by_date))
        .route(
            "/activities/:id",
            get(get_activity).put(update_activity).delete(delete_activity),
        )
        .route("/openapi.json", get(openapi_json))
        .with_state(state)
}
