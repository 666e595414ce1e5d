//! Repository: one typed operation per (entity, operation) pair, each a single store round trip.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

use crate::error::StoreError;
use crate::models::{Activity, CurricularComponent, Holiday};
use crate::schema::ACTIVITY_STATUS_PENDING;
use crate::service::ValidatedInput;
use crate::sql::FieldValue;
use async_trait::async_trait;

#[async_trait]
pub trait Repository: Send + Sync {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_curricular_components(&self) -> Result<Vec<CurricularComponent>, StoreError>;
    async fn get_curricular_component(&self, id: i32) -> Result<Option<CurricularComponent>, StoreError>;
    async fn create_curricular_component(&self, input: ValidatedInput) -> Result<CurricularComponent, StoreError>;
    async fn update_curricular_component(
        &self,
        id: i32,
        input: ValidatedInput,
    ) -> Result<Option<CurricularComponent>, StoreError>;
    async fn delete_curricular_component(&self, id: i32) -> Result<bool, StoreError>;

    async fn list_holidays(&self) -> Result<Vec<Holiday>, StoreError>;
    async fn get_holiday(&self, id: i32) -> Result<Option<Holiday>, StoreError>;
    async fn create_holiday(&self, input: ValidatedInput) -> Result<Holiday, StoreError>;
    async fn delete_holiday(&self, id: i32) -> Result<bool, StoreError>;

    async fn list_activities(&self) -> Result<Vec<Activity>, StoreError>;
    async fn get_activity(&self, id: i32) -> Result<Option<Activity>, StoreError>;
    /// Status is always stored as "pending", whatever the input carries.
    async fn create_activity(&self, input: ValidatedInput) -> Result<Activity, StoreError>;
    async fn update_activity(&self, id: i32, input: ValidatedInput) -> Result<Option<Activity>, StoreError>;
    async fn delete_activity(&self, id: i32) -> Result<bool, StoreError>;
    /// Exact string match on realizationDate.
    async fn list_activities_by_date(&self, date: &str) -> Result<Vec<Activity>, StoreError>;
}

pub(crate) fn with_pending_status(mut input: ValidatedInput) -> ValidatedInput {
    input.force("status", FieldValue::Text(ACTIVITY_STATUS_PENDING.to_string()));
    input
}
