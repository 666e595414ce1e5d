//! Repository tests against a live PostgreSQL. Skipped unless `TEST_DATABASE_URL` is set.
//! Each run works in its own schema and drops it afterwards.

use cronograma::schema::{Contract, ACTIVITIES, CURRICULAR_COMPONENTS, HOLIDAYS};
use cronograma::service::RequestValidator;
use cronograma::{ensure_tables, PgRepository, Repository};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

async fn isolated_pool() -> Option<(PgPool, String)> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let schema = format!("cronograma_test_{}", uuid::Uuid::new_v4().simple());
    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(move |conn, _meta| {
            let schema = search_path.clone();
            Box::pin(async move {
                sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\""))
                    .execute(&mut *conn)
                    .await?;
                sqlx::query(&format!("SET search_path TO \"{schema}\""))
                    .execute(&mut *conn)
                    .await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .unwrap();
    ensure_tables(&pool).await.unwrap();
    Some((pool, schema))
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA \"{schema}\" CASCADE"))
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn postgres_round_trip() {
    let Some((pool, schema)) = isolated_pool().await else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    // Tables already exist now; a second pass must be a no-op.
    ensure_tables(&pool).await.unwrap();
    let repo = PgRepository::new(pool.clone());
    repo.ping().await.unwrap();

    let holiday = RequestValidator::validate(
        &Contract::insert(&HOLIDAYS),
        &json!({"name": "Carnaval", "date": "2024-02-13"}),
    )
    .unwrap();
    let created = repo.create_holiday(holiday).await.unwrap();
    assert_eq!(created.name, "Carnaval");
    assert_eq!(repo.list_holidays().await.unwrap(), vec![created.clone()]);
    assert!(repo.delete_holiday(created.id).await.unwrap());
    assert!(!repo.delete_holiday(created.id).await.unwrap());

    let component = RequestValidator::validate(
        &Contract::insert(&CURRICULAR_COMPONENTS),
        &json!({
            "name": "Algoritmos",
            "startDate": "2024-02-05",
            "endDate": "2024-06-28",
            "color": "#3b82f6",
            "weekDays": ["monday", "wednesday"]
        }),
    )
    .unwrap();
    let component = repo.create_curricular_component(component).await.unwrap();
    assert_eq!(component.week_days, vec!["monday", "wednesday"]);
    assert_eq!(component.start_time, None);

    let unchanged = repo
        .update_curricular_component(
            component.id,
            RequestValidator::validate(&Contract::partial(&CURRICULAR_COMPONENTS), &json!({})).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(unchanged, Some(component.clone()));

    let activity = RequestValidator::validate(
        &Contract::insert(&ACTIVITIES),
        &json!({
            "description": "Prova 1",
            "modality": "presencial",
            "componentId": component.id,
            "deliveryDate": "2024-03-10",
            "realizationDate": "2024-03-15"
        }),
    )
    .unwrap();
    let activity = repo.create_activity(activity).await.unwrap();
    assert_eq!(activity.status, "pending");
    assert_eq!(repo.list_activities_by_date("2024-03-15").await.unwrap().len(), 1);
    assert!(repo.list_activities_by_date("2024-03-16").await.unwrap().is_empty());

    let done = repo
        .update_activity(
            activity.id,
            RequestValidator::validate(&Contract::activity_status(), &json!({"status": "done"})).unwrap(),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.status, "done");
    assert_eq!(done.description, activity.description);

    assert!(repo.delete_curricular_component(component.id).await.unwrap());
    let detached = repo.get_activity(activity.id).await.unwrap().unwrap();
    assert_eq!(detached.component_id, None);

    drop_schema(&pool, &schema).await;
}
