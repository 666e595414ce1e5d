//! End-to-end API tests against the in-memory repository.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    routing::get,
    Router,
};
use cronograma::{app, middleware, AppState, FaultSignal, MemoryRepository};
use serde_json::{json, Value};
use std::io;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new(MemoryRepository::new()), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn component() -> Value {
    json!({
        "name": "Algoritmos",
        "startDate": "2024-02-05",
        "endDate": "2024-06-28",
        "color": "#3b82f6",
        "weekDays": ["monday", "wednesday"],
        "startTime": "08:00",
        "endTime": "09:40"
    })
}

fn activity(component_id: Option<i64>) -> Value {
    json!({
        "description": "Prova 1",
        "modality": "presencial",
        "componentId": component_id,
        "deliveryDate": "2024-03-10",
        "realizationDate": "2024-03-15"
    })
}

#[tokio::test]
async fn holiday_lifecycle() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/api/holidays", Some(json!({"name": "Carnaval", "date": "2024-02-13"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"id": 1, "name": "Carnaval", "date": "2024-02-13"}));

    let (status, body) = send(&app, Method::GET, "/api/holidays", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "name": "Carnaval", "date": "2024-02-13"}]));

    let (status, body) = send(&app, Method::DELETE, "/api/holidays/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, body) = send(&app, Method::GET, "/api/holidays", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn component_round_trips_through_create_and_read() {
    let app = test_app();
    let (status, created) = send(&app, Method::POST, "/api/curricular-components", Some(component())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["weekDays"], json!(["monday", "wednesday"]));

    let (status, fetched) = send(&app, Method::GET, "/api/curricular-components/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    for key in ["name", "startDate", "endDate", "color", "weekDays", "startTime", "endTime"] {
        assert_eq!(fetched[key], component()[key], "{key}");
    }
}

#[tokio::test]
async fn component_update_is_partial() {
    let app = test_app();
    send(&app, Method::POST, "/api/curricular-components", Some(component())).await;
    let (status, body) = send(&app, Method::PUT, "/api/curricular-components/1", Some(json!({"color": "#ef4444"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["color"], "#ef4444");
    assert_eq!(body["name"], "Algoritmos");
    assert_eq!(body["weekDays"], json!(["monday", "wednesday"]));

    let (status, body) = send(&app, Method::PUT, "/api/curricular-components/1", Some(json!({"color": 5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid component data");

    let (status, body) = send(&app, Method::PUT, "/api/curricular-components/9", Some(json!({"color": "#000"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Component not found"}));
}

#[tokio::test]
async fn new_activities_start_pending() {
    let app = test_app();
    let mut body = activity(None);
    body["status"] = json!("done");
    let (status, created) = send(&app, Method::POST, "/api/activities", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["componentId"], Value::Null);
}

#[tokio::test]
async fn activity_update_touches_only_status_and_observation() {
    let app = test_app();
    send(&app, Method::POST, "/api/curricular-components", Some(component())).await;
    let (_, created) = send(&app, Method::POST, "/api/activities", Some(activity(Some(1)))).await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/activities/1",
        Some(json!({"status": "done", "description": "ignored"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "done");
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["componentId"], 1);
    assert_eq!(updated["realizationDate"], created["realizationDate"]);

    let (status, body) = send(&app, Method::PUT, "/api/activities/1", Some(json!({"status": 3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid activity data");
}

#[tokio::test]
async fn deleting_a_component_detaches_its_activities() {
    let app = test_app();
    send(&app, Method::POST, "/api/curricular-components", Some(component())).await;
    send(&app, Method::POST, "/api/activities", Some(activity(Some(1)))).await;

    let (status, _) = send(&app, Method::DELETE, "/api/curricular-components/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&app, Method::GET, "/api/activities/1", None).await;
    assert_eq!(body["componentId"], Value::Null);
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let app = test_app();
    send(&app, Method::POST, "/api/curricular-components", Some(component())).await;
    send(&app, Method::POST, "/api/holidays", Some(json!({"name": "Tiradentes", "date": "2024-04-21"}))).await;
    send(&app, Method::POST, "/api/activities", Some(activity(None))).await;

    for (uri, message) in [
        ("/api/curricular-components/1", "Component not found"),
        ("/api/holidays/1", "Holiday not found"),
        ("/api/activities/1", "Activity not found"),
    ] {
        let (status, _) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        let (status, body) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"message": message}));
    }
}

#[tokio::test]
async fn missing_field_lists_every_issue() {
    let app = test_app();
    let mut body = component();
    body.as_object_mut().unwrap().remove("name");
    body["color"] = json!(12);
    let (status, body) = send(&app, Method::POST, "/api/curricular-components", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid component data");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e["path"] == json!(["name"]) && e["code"] == "missing"));
    assert!(errors
        .iter()
        .any(|e| e["path"] == json!(["color"]) && e["code"] == "invalid_type" && e["received"] == "number"));

    let (_, list) = send(&app, Method::GET, "/api/curricular-components", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn date_filter_matches_exactly() {
    let app = test_app();
    send(&app, Method::POST, "/api/activities", Some(activity(None))).await;
    let mut other = activity(None);
    other["realizationDate"] = json!("2024-03-16");
    send(&app, Method::POST, "/api/activities", Some(other)).await;

    let (status, body) = send(&app, Method::GET, "/api/activities/date/2024-03-15", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], 1);

    let (_, body) = send(&app, Method::GET, "/api/activities/date/2024-03", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn malformed_requests_are_bad_requests() {
    let app = test_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/holidays")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await.unwrap()).unwrap();
    assert!(body["message"].is_string());

    let (status, body) = send(&app, Method::GET, "/api/holidays/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"message": "Invalid id: abc"}));

    let (status, _) = send(&app, Method::POST, "/api/holidays", Some(json!(["Carnaval"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_and_readiness() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");
    let (_, body) = send(&app, Method::GET, "/version", None).await;
    assert_eq!(body["name"], "cronograma");
}

#[tokio::test]
async fn serves_openapi_document() {
    let (status, body) = send(&test_app(), Method::GET, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/activities/date/{date}"].is_object());
    assert!(body["components"]["schemas"]["Activity"].is_object());
}

async fn boom() -> &'static str {
    panic!("boom")
}

#[tokio::test]
async fn panicking_handler_answers_500_and_trips_fail_fast() {
    let signal = FaultSignal::new();
    let router = Router::new().route("/api/boom", get(boom));
    let app = middleware::apply(router, Some(signal.clone()));
    let (status, body) = send(&app, Method::GET, "/api/boom", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Internal Server Error"}));
    assert!(signal.is_tripped());
}

#[tokio::test]
async fn fault_signal_stays_quiet_when_fail_fast_is_off() {
    let router = Router::new().route("/api/boom", get(boom));
    let app = middleware::apply(router, None);
    let (status, _) = send(&app, Method::GET, "/api/boom", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn dangling_component_reference_fails_the_create() {
    let app = test_app();
    let (status, body) = send(&app, Method::POST, "/api/activities", Some(activity(Some(999)))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Failed to create activity"}));

    let (_, body) = send(&app, Method::GET, "/api/activities", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_of_an_impossible_id_is_not_found() {
    let app = test_app();
    for (uri, message) in [
        ("/api/holidays/3000000000", "Holiday not found"),
        ("/api/curricular-components/abc", "Component not found"),
        ("/api/activities/-1", "Activity not found"),
    ] {
        let (status, body) = send(&app, Method::DELETE, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({"message": message}));
    }
}

#[tokio::test]
async fn every_bad_week_day_is_reported() {
    let app = test_app();
    let mut body = component();
    body["weekDays"] = json!(["monday", 2, "friday", true]);
    let (status, body) = send(&app, Method::POST, "/api/curricular-components", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let paths: Vec<&Value> = body["errors"].as_array().unwrap().iter().map(|e| &e["path"]).collect();
    assert_eq!(paths, vec![&json!(["weekDays", 1]), &json!(["weekDays", 3])]);
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn recovered_panics_are_logged_as_completed_requests() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = middleware::apply(Router::new().route("/api/boom", get(boom)), None);
    let (status, _) = send(&app, Method::GET, "/api/boom", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let text = log.text();
    let completed = text
        .lines()
        .find(|l| l.contains("request completed"))
        .unwrap_or_else(|| panic!("no completion event in:\n{text}"));
    assert!(completed.contains("path=/api/boom"));
    assert!(completed.contains("status=500"));
    assert!(completed.contains("Internal Server Error"));
}
