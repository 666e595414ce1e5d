use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::{text, text_array, Record};
use crate::schema::{EntitySchema, CURRICULAR_COMPONENTS};
use crate::sql::FieldValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurricularComponent {
    pub id: i32,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub color: String,
    pub week_days: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl Record for CurricularComponent {
    fn schema() -> &'static EntitySchema {
        &CURRICULAR_COMPONENTS
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn assign(&mut self, column: &str, value: &FieldValue) {
        match column {
            "week_days" => {
                if let Some(v) = text_array(value) {
                    self.week_days = v;
                }
            }
            "start_time" => {
                if let Some(v) = text(value) {
                    self.start_time = v;
                }
            }
            "end_time" => {
                if let Some(v) = text(value) {
                    self.end_time = v;
                }
            }
            _ => {
                let Some(Some(v)) = text(value) else { return };
                match column {
                    "name" => self.name = v,
                    "start_date" => self.start_date = v,
                    "end_date" => self.end_date = v,
                    "color" => self.color = v,
                    _ => {}
                }
            }
        }
    }
}
