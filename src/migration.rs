//! Startup DDL generated from the entity declarations. Idempotent: existing tables are left untouched.

use crate::error::StoreError;
use crate::schema::{self, EntitySchema, FieldDef};
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn column_def(field: &FieldDef) -> String {
    if field.primary_key {
        return format!("{} SERIAL PRIMARY KEY", quote(field.column));
    }
    let mut def = format!("{} {}", quote(field.column), field.kind.pg_type());
    if !field.nullable {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = field.default {
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }
    if let Some(r) = &field.references {
        def.push_str(&format!(
            " REFERENCES {} ({}) ON DELETE {}",
            quote(r.table),
            quote(r.column),
            r.on_delete
        ));
    }
    def
}

/// `CREATE TABLE IF NOT EXISTS` for one entity.
pub fn create_table_sql(entity: &EntitySchema) -> String {
    let cols: Vec<String> = entity.fields.iter().map(column_def).collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
        quote(entity.table),
        cols.join(",\n    ")
    )
}

/// Create every table that does not exist yet, referenced tables first.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), StoreError> {
    for entity in schema::all() {
        let ddl = create_table_sql(entity);
        tracing::debug!(table = entity.table, sql = %ddl, "ensure table");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}
