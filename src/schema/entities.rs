//! The three schedule tables. Storage DDL, SQL column lists and input contracts are all derived from these lists.

use super::types::{EntitySchema, FieldDef, Reference};

pub static CURRICULAR_COMPONENTS: EntitySchema = EntitySchema {
    label: "component",
    table: "curricular_components",
    fields: &[
        FieldDef::serial_id(),
        FieldDef::text("name", "name"),
        FieldDef::text("startDate", "start_date"),
        FieldDef::text("endDate", "end_date"),
        FieldDef::text("color", "color"),
        FieldDef::text_array("weekDays", "week_days"),
        FieldDef::text("startTime", "start_time").nullable(),
        FieldDef::text("endTime", "end_time").nullable(),
    ],
};

pub static HOLIDAYS: EntitySchema = EntitySchema {
    label: "holiday",
    table: "holidays",
    fields: &[
        FieldDef::serial_id(),
        FieldDef::text("name", "name"),
        FieldDef::text("date", "date"),
    ],
};

/// Deleting a component keeps its activities and clears their reference.
pub const COMPONENT_REFERENCE: Reference = Reference {
    table: "curricular_components",
    column: "id",
    on_delete: "SET NULL",
};

pub const ACTIVITY_STATUS_PENDING: &str = "pending";

pub static ACTIVITIES: EntitySchema = EntitySchema {
    label: "activity",
    table: "activities",
    fields: &[
        FieldDef::serial_id(),
        FieldDef::text("description", "description"),
        FieldDef::text("modality", "modality"),
        FieldDef::integer("componentId", "component_id")
            .nullable()
            .references(COMPONENT_REFERENCE),
        FieldDef::text("deliveryDate", "delivery_date"),
        FieldDef::text("realizationDate", "realization_date"),
        FieldDef::text("status", "status")
            .server_owned()
            .with_default("'pending'"),
        FieldDef::text("observation", "observation").nullable(),
    ],
};

/// Creation order respects references.
pub fn all() -> [&'static EntitySchema; 3] {
    [&CURRICULAR_COMPONENTS, &HOLIDAYS, &ACTIVITIES]
}
