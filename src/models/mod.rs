//! Stored rows as returned to clients (camelCase JSON, snake_case columns).

pub mod activity;
pub mod curricular_component;
pub mod holiday;

pub use activity::Activity;
pub use curricular_component::CurricularComponent;
pub use holiday::Holiday;

use crate::schema::EntitySchema;
use crate::sql::FieldValue;

/// A row type bound to its declaration.
pub trait Record: Clone + Default + Send + Sync + Unpin + 'static {
    fn schema() -> &'static EntitySchema;

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Write one validated value into the matching field. Unknown columns and mismatched kinds are ignored.
    fn assign(&mut self, column: &str, value: &FieldValue);

    /// Build a row from validated values; fields not supplied keep their defaults.
    fn from_values<'a, 'b>(id: i32, values: impl IntoIterator<Item = (&'a str, &'b FieldValue)>) -> Self {
        let mut row = Self::default();
        row.set_id(id);
        for (column, value) in values {
            row.assign(column, value);
        }
        row
    }
}

pub(crate) fn text(value: &FieldValue) -> Option<Option<String>> {
    match value {
        FieldValue::Text(s) => Some(Some(s.clone())),
        FieldValue::Null(_) => Some(None),
        _ => None,
    }
}

pub(crate) fn integer(value: &FieldValue) -> Option<Option<i32>> {
    match value {
        FieldValue::Integer(n) => Some(Some(*n)),
        FieldValue::Null(_) => Some(None),
        _ => None,
    }
}

pub(crate) fn text_array(value: &FieldValue) -> Option<Vec<String>> {
    match value {
        FieldValue::TextArray(items) => Some(items.clone()),
        _ => None,
    }
}
