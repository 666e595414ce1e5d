use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{text, Record};
use crate::schema::{EntitySchema, HOLIDAYS};
use crate::sql::FieldValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: i32,
    pub name: String,
    pub date: String,
}

impl Record for Holiday {
    fn schema() -> &'static EntitySchema {
        &HOLIDAYS
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn assign(&mut self, column: &str, value: &FieldValue) {
        let Some(Some(v)) = text(value) else { return };
        match column {
            "name" => self.name = v,
            "date" => self.date = v,
            _ => {}
        }
    }
}
