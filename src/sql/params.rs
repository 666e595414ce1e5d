//! Typed values produced by validation and bound to PostgreSQL statements.

use crate::schema::FieldKind;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{Query, QueryAs};

/// A value for one declared column. Nulls keep their column kind so they bind with the right type.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null(FieldKind),
    Text(String),
    TextArray(Vec<String>),
    Integer(i32),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Bind one value to a statement without typed output (DELETE).
pub fn bind_arg<'q>(query: Query<'q, Postgres, PgArguments>, value: &FieldValue) -> Query<'q, Postgres, PgArguments> {
    match value {
        FieldValue::Null(FieldKind::Text) => query.bind(None::<String>),
        FieldValue::Null(FieldKind::TextArray) => query.bind(None::<Vec<String>>),
        FieldValue::Null(FieldKind::Integer) => query.bind(None::<i32>),
        FieldValue::Text(s) => query.bind(s.clone()),
        FieldValue::TextArray(items) => query.bind(items.clone()),
        FieldValue::Integer(n) => query.bind(*n),
    }
}

/// Bind one value to a typed query. Values are cloned so the query does not borrow the input.
pub fn bind_value<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    value: &FieldValue,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match value {
        FieldValue::Null(FieldKind::Text) => query.bind(None::<String>),
        FieldValue::Null(FieldKind::TextArray) => query.bind(None::<Vec<String>>),
        FieldValue::Null(FieldKind::Integer) => query.bind(None::<i32>),
        FieldValue::Text(s) => query.bind(s.clone()),
        FieldValue::TextArray(items) => query.bind(items.clone()),
        FieldValue::Integer(n) => query.bind(*n),
    }
}
