//! PostgreSQL repository. SQL comes from the builder; rows decode straight into the models.

use super::{with_pending_status, Repository};
use crate::error::StoreError;
use crate::models::{Activity, CurricularComponent, Holiday, Record};
use crate::service::ValidatedInput;
use crate::sql::{bind_arg, bind_value, builder, FieldValue, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn query_many<T>(&self, q: &QueryBuf) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = bind_value(query, p);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn query_one<T>(&self, q: &QueryBuf) -> Result<Option<T>, StoreError>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = bind_value(query, p);
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = bind_arg(query, p);
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }

    async fn list<T>(&self) -> Result<Vec<T>, StoreError>
    where
        T: Record + for<'r> FromRow<'r, PgRow>,
    {
        self.query_many(&builder::select_list(T::schema())).await
    }

    async fn get<T>(&self, id: i32) -> Result<Option<T>, StoreError>
    where
        T: Record + for<'r> FromRow<'r, PgRow>,
    {
        self.query_one(&builder::select_by_id(T::schema(), id)).await
    }

    async fn create<T>(&self, input: &ValidatedInput) -> Result<T, StoreError>
    where
        T: Record + for<'r> FromRow<'r, PgRow>,
    {
        let q = builder::insert(T::schema(), &input.values);
        self.query_one(&q)
            .await?
            .ok_or(StoreError::Db(sqlx::Error::RowNotFound))
    }

    async fn update<T>(&self, id: i32, input: &ValidatedInput) -> Result<Option<T>, StoreError>
    where
        T: Record + for<'r> FromRow<'r, PgRow>,
    {
        self.query_one(&builder::update(T::schema(), id, &input.values))
            .await
    }

    async fn delete<T: Record>(&self, id: i32) -> Result<bool, StoreError> {
        let removed = self.execute(&builder::delete(T::schema(), id)).await?;
        Ok(removed > 0)
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_curricular_components(&self) -> Result<Vec<CurricularComponent>, StoreError> {
        self.list().await
    }

    async fn get_curricular_component(&self, id: i32) -> Result<Option<CurricularComponent>, StoreError> {
        self.get(id).await
    }

    async fn create_curricular_component(&self, input: ValidatedInput) -> Result<CurricularComponent, StoreError> {
        self.create(&input).await
    }

    async fn update_curricular_component(
        &self,
        id: i32,
        input: ValidatedInput,
    ) -> Result<Option<CurricularComponent>, StoreError> {
        self.update(id, &input).await
    }

    async fn delete_curricular_component(&self, id: i32) -> Result<bool, StoreError> {
        self.delete::<CurricularComponent>(id).await
    }

    async fn list_holidays(&self) -> Result<Vec<Holiday>, StoreError> {
        self.list().await
    }

    async fn get_holiday(&self, id: i32) -> Result<Option<Holiday>, StoreError> {
        self.get(id).await
    }

    async fn create_holiday(&self, input: ValidatedInput) -> Result<Holiday, StoreError> {
        self.create(&input).await
    }

    async fn delete_holiday(&self, id: i32) -> Result<bool, StoreError> {
        self.delete::<Holiday>(id).await
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, StoreError> {
        self.list().await
    }

    async fn get_activity(&self, id: i32) -> Result<Option<Activity>, StoreError> {
        self.get(id).await
    }

    async fn create_activity(&self, input: ValidatedInput) -> Result<Activity, StoreError> {
        self.create(&with_pending_status(input)).await
    }

    async fn update_activity(&self, id: i32, input: ValidatedInput) -> Result<Option<Activity>, StoreError> {
        self.update(id, &input).await
    }

    async fn delete_activity(&self, id: i32) -> Result<bool, StoreError> {
        self.delete::<Activity>(id).await
    }

    async fn list_activities_by_date(&self, date: &str) -> Result<Vec<Activity>, StoreError> {
        let q = builder::select_where(
            Activity::schema(),
            "realization_date",
            FieldValue::Text(date.to_string()),
        );
        self.query_many(&q).await
    }
}
