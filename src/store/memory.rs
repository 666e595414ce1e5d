//! In-process repository with the same semantics as PostgreSQL: sequential ids per table,
//! store-assigned status, rejected dangling references, and `SET NULL` on activities when
//! their component is deleted.

use super::{with_pending_status, Repository};
use crate::error::StoreError;
use crate::models::{Activity, CurricularComponent, Holiday, Record};
use crate::schema::{ACTIVITIES, CURRICULAR_COMPONENTS, HOLIDAYS};
use crate::service::ValidatedInput;
use crate::sql::FieldValue;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    fn list(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn insert(&mut self, input: &ValidatedInput) -> T {
        self.last_id += 1;
        let row = T::from_values(
            self.last_id,
            input.values.iter().map(|(f, v)| (f.column, v)),
        );
        self.rows.insert(row.id(), row.clone());
        row
    }

    fn update(&mut self, id: i32, input: &ValidatedInput) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        for (field, value) in &input.values {
            row.assign(field.column, value);
        }
        Some(row.clone())
    }

    fn delete(&mut self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

#[derive(Default)]
struct Tables {
    components: Table<CurricularComponent>,
    holidays: Table<Holiday>,
    activities: Table<Activity>,
}

impl Tables {
    fn has_row(&self, table: &str, id: i32) -> bool {
        if table == CURRICULAR_COMPONENTS.table {
            self.components.rows.contains_key(&id)
        } else if table == HOLIDAYS.table {
            self.holidays.rows.contains_key(&id)
        } else if table == ACTIVITIES.table {
            self.activities.rows.contains_key(&id)
        } else {
            false
        }
    }

    /// Non-null values of referencing columns must point at an existing row.
    fn check_references(&self, input: &ValidatedInput) -> Result<(), StoreError> {
        for (field, value) in &input.values {
            if let (Some(reference), FieldValue::Integer(id)) = (&field.references, value) {
                if !self.has_row(reference.table, *id) {
                    return Err(StoreError::MissingReference {
                        table: input.schema.table,
                        column: field.column,
                        id: *id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> Result<(), StoreError> {
        self.tables().map(|_| ())
    }

    async fn list_curricular_components(&self) -> Result<Vec<CurricularComponent>, StoreError> {
        Ok(self.tables()?.components.list())
    }

    async fn get_curricular_component(&self, id: i32) -> Result<Option<CurricularComponent>, StoreError> {
        Ok(self.tables()?.components.get(id))
    }

    async fn create_curricular_component(&self, input: ValidatedInput) -> Result<CurricularComponent, StoreError> {
        Ok(self.tables()?.components.insert(&input))
    }

    async fn update_curricular_component(
        &self,
        id: i32,
        input: ValidatedInput,
    ) -> Result<Option<CurricularComponent>, StoreError> {
        Ok(self.tables()?.components.update(id, &input))
    }

    async fn delete_curricular_component(&self, id: i32) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        if !tables.components.delete(id) {
            return Ok(false);
        }
        for activity in tables.activities.rows.values_mut() {
            if activity.component_id == Some(id) {
                activity.component_id = None;
            }
        }
        Ok(true)
    }

    async fn list_holidays(&self) -> Result<Vec<Holiday>, StoreError> {
        Ok(self.tables()?.holidays.list())
    }

    async fn get_holiday(&self, id: i32) -> Result<Option<Holiday>, StoreError> {
        Ok(self.tables()?.holidays.get(id))
    }

    async fn create_holiday(&self, input: ValidatedInput) -> Result<Holiday, StoreError> {
        Ok(self.tables()?.holidays.insert(&input))
    }

    async fn delete_holiday(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables()?.holidays.delete(id))
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, StoreError> {
        Ok(self.tables()?.activities.list())
    }

    async fn get_activity(&self, id: i32) -> Result<Option<Activity>, StoreError> {
        Ok(self.tables()?.activities.get(id))
    }

    async fn create_activity(&self, input: ValidatedInput) -> Result<Activity, StoreError> {
        let input = with_pending_status(input);
        let mut tables = self.tables()?;
        tables.check_references(&input)?;
        Ok(tables.activities.insert(&input))
    }

    async fn update_activity(&self, id: i32, input: ValidatedInput) -> Result<Option<Activity>, StoreError> {
        let mut tables = self.tables()?;
        if !tables.activities.rows.contains_key(&id) {
            return Ok(None);
        }
        tables.check_references(&input)?;
        Ok(tables.activities.update(id, &input))
    }

    async fn delete_activity(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.tables()?.activities.delete(id))
    }

    async fn list_activities_by_date(&self, date: &str) -> Result<Vec<Activity>, StoreError> {
        Ok(self
            .tables()?
            .activities
            .rows
            .values()
            .filter(|a| a.realization_date == date)
            .cloned()
            .collect())
    }
}
