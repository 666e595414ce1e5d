//! OpenAPI document served at `/api/openapi.json`.

use crate::handlers::{activity, curricular_component, holiday};
use crate::models::{Activity, CurricularComponent, Holiday};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "cronograma", description = "Course schedule planner API"),
    paths(
        curricular_component::list_components,
        curricular_component::get_component,
        curricular_component::create_component,
        curricular_component::update_component,
        curricular_component::delete_component,
        holiday::list_holidays,
        holiday::get_holiday,
        holiday::create_holiday,
        holiday::delete_holiday,
        activity::list_activities,
        activity::list_activities_by_date,
        activity::get_activity,
        activity::create_activity,
        activity::update_activity,
        activity::delete_activity,
    ),
    components(schemas(CurricularComponent, Holiday, Activity)),
    tags(
        (name = "curricular-components", description = "Courses with their date range and weekly meeting days"),
        (name = "holidays", description = "Days without classes"),
        (name = "activities", description = "Graded work attached to a course")
    )
)]
pub struct ApiDoc;
