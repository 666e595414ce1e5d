//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from entity declarations.
//! Identifiers come only from the declarations; every value is a bind parameter.

use crate::schema::{EntitySchema, FieldDef};
use crate::sql::FieldValue;

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: FieldValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Every declared column, in declaration order.
fn select_column_list(schema: &EntitySchema) -> String {
    schema
        .fields
        .iter()
        .map(|f| quoted(f.column))
        .collect::<Vec<_>>()
        .join(", ")
}

fn pk(schema: &EntitySchema) -> String {
    quoted(schema.primary_key().column)
}

/// SELECT all rows ordered by primary key.
pub fn select_list(schema: &EntitySchema) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(schema),
        quoted(schema.table),
        pk(schema)
    );
    q
}

/// SELECT rows whose column equals the value exactly.
pub fn select_where(schema: &EntitySchema, column: &str, value: FieldValue) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(value);
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${} ORDER BY {}",
        select_column_list(schema),
        quoted(schema.table),
        quoted(column),
        n,
        pk(schema)
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(schema: &EntitySchema, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::Integer(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(schema),
        quoted(schema.table),
        pk(schema),
        n
    );
    q
}

/// INSERT the given values; omitted columns take their store default. Returns the stored row.
pub fn insert(schema: &EntitySchema, values: &[(&FieldDef, FieldValue)]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = quoted(schema.table);
    let returning = select_column_list(schema);
    if values.is_empty() {
        q.sql = format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", table, returning);
        return q;
    }
    let mut cols = Vec::with_capacity(values.len());
    let mut placeholders = Vec::with_capacity(values.len());
    for (field, value) in values {
        let n = q.push_param(value.clone());
        cols.push(quoted(field.column));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        table,
        cols.join(", "),
        placeholders.join(", "),
        returning
    );
    q
}

/// UPDATE by primary key, setting only the given columns. With nothing to set this degrades to a SELECT by id.
pub fn update(schema: &EntitySchema, id: i32, values: &[(&FieldDef, FieldValue)]) -> QueryBuf {
    let sets: Vec<_> = values.iter().filter(|(f, _)| !f.primary_key).collect();
    if sets.is_empty() {
        return select_by_id(schema, id);
    }
    let mut q = QueryBuf::new();
    let mut assignments = Vec::with_capacity(sets.len());
    for (field, value) in sets {
        let n = q.push_param(value.clone());
        assignments.push(format!("{} = ${}", quoted(field.column), n));
    }
    let id_param = q.push_param(FieldValue::Integer(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(schema.table),
        assignments.join(", "),
        pk(schema),
        id_param,
        select_column_list(schema)
    );
    q
}

/// DELETE by primary key.
pub fn delete(schema: &EntitySchema, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(FieldValue::Integer(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(schema.table),
        pk(schema),
        n
    );
    q
}
