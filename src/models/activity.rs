use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{integer, text, Record};
use crate::schema::{EntitySchema, ACTIVITIES};
use crate::sql::FieldValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i32,
    pub description: String,
    pub modality: String,
    /// Non-owning reference to a curricular component; cleared when that component is deleted.
    pub component_id: Option<i32>,
    pub delivery_date: String,
    pub realization_date: String,
    pub status: String,
    pub observation: Option<String>,
}

impl Record for Activity {
    fn schema() -> &'static EntitySchema {
        &ACTIVITIES
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn assign(&mut self, column: &str, value: &FieldValue) {
        match column {
            "component_id" => {
                if let Some(v) = integer(value) {
                    self.component_id = v;
                }
            }
            "observation" => {
                if let Some(v) = text(value) {
                    self.observation = v;
                }
            }
            _ => {
                let Some(Some(v)) = text(value) else { return };
                match column {
                    "description" => self.description = v,
                    "modality" => self.modality = v,
                    "delivery_date" => self.delivery_date = v,
                    "realization_date" => self.realization_date = v,
                    "status" => self.status = v,
                    _ => {}
                }
            }
        }
    }
}
