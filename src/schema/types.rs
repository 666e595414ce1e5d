//! Entity declaration types: one field list per table drives DDL, SQL and validation.

/// Storage/validation type of a declared field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArray,
    Integer,
}

impl FieldKind {
    /// PostgreSQL column type used in generated DDL.
    pub fn pg_type(self) -> &'static str {
        match self {
            FieldKind::Text => "TEXT",
            FieldKind::TextArray => "TEXT[]",
            FieldKind::Integer => "INTEGER",
        }
    }

    /// Name reported to clients in validation issues.
    pub fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::TextArray => "array",
            FieldKind::Integer => "number",
        }
    }
}

/// Foreign reference declared on a column.
#[derive(Clone, Copy, Debug)]
pub struct Reference {
    pub table: &'static str,
    pub column: &'static str,
    pub on_delete: &'static str,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    /// camelCase key used on the wire.
    pub name: &'static str,
    /// snake_case column in the store.
    pub column: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub primary_key: bool,
    /// Assigned by the server; never accepted from client input.
    pub server_owned: bool,
    /// Literal SQL default, if any.
    pub default: Option<&'static str>,
    pub references: Option<Reference>,
}

impl FieldDef {
    pub const fn text(name: &'static str, column: &'static str) -> Self {
        FieldDef {
            name,
            column,
            kind: FieldKind::Text,
            nullable: false,
            primary_key: false,
            server_owned: false,
            default: None,
            references: None,
        }
    }

    pub const fn text_array(name: &'static str, column: &'static str) -> Self {
        FieldDef {
            kind: FieldKind::TextArray,
            ..FieldDef::text(name, column)
        }
    }

    pub const fn integer(name: &'static str, column: &'static str) -> Self {
        FieldDef {
            kind: FieldKind::Integer,
            ..FieldDef::text(name, column)
        }
    }

    /// SERIAL primary key named `id`.
    pub const fn serial_id() -> Self {
        FieldDef {
            primary_key: true,
            server_owned: true,
            ..FieldDef::integer("id", "id")
        }
    }

    pub const fn nullable(self) -> Self {
        FieldDef {
            nullable: true,
            ..self
        }
    }

    pub const fn server_owned(self) -> Self {
        FieldDef {
            server_owned: true,
            ..self
        }
    }

    pub const fn with_default(self, default: &'static str) -> Self {
        FieldDef {
            default: Some(default),
            ..self
        }
    }

    pub const fn references(self, reference: Reference) -> Self {
        FieldDef {
            references: Some(reference),
            ..self
        }
    }

    /// Required on insert: NOT NULL and no store default.
    pub fn required(&self) -> bool {
        !self.nullable && self.default.is_none()
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    /// Singular label used in log lines and messages.
    pub label: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldDef],
}

impl EntitySchema {
    pub fn primary_key(&self) -> &FieldDef {
        self.fields
            .iter()
            .find(|f| f.primary_key)
            .unwrap_or(&self.fields[0])
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_column(&self, column: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Fields a client may supply on create, in declaration order.
    pub fn input_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.server_owned)
    }
}
