//! Validation contracts derived from entity declarations.

use super::entities::ACTIVITIES;
use super::types::{EntitySchema, FieldDef};

#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub field: &'static FieldDef,
    pub required: bool,
    pub nullable: bool,
}

/// A rule set checked against one request body.
#[derive(Clone, Debug)]
pub struct Contract {
    pub schema: &'static EntitySchema,
    pub rules: Vec<Rule>,
}

impl Contract {
    /// Create input: every client-suppliable field, required unless nullable or defaulted.
    pub fn insert(schema: &'static EntitySchema) -> Self {
        let rules = schema
            .input_fields()
            .map(|field| Rule {
                field,
                required: field.required(),
                nullable: field.nullable,
            })
            .collect();
        Contract { schema, rules }
    }

    /// Same per-field rules as [`Contract::insert`], but nothing is required.
    pub fn partial(schema: &'static EntitySchema) -> Self {
        let mut contract = Self::insert(schema);
        for rule in &mut contract.rules {
            rule.required = false;
        }
        contract
    }

    /// Activity updates may only touch `status` and `observation`, both non-null strings.
    pub fn activity_status() -> Self {
        let rules = ["status", "observation"]
            .into_iter()
            .filter_map(|name| ACTIVITIES.field(name))
            .map(|field| Rule {
                field,
                required: false,
                nullable: false,
            })
            .collect();
        Contract {
            schema: &ACTIVITIES,
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CURRICULAR_COMPONENTS, HOLIDAYS};

    fn names(contract: &Contract) -> Vec<&'static str> {
        contract.rules.iter().map(|r| r.field.name).collect()
    }

    #[test]
    fn insert_contract_omits_server_owned_fields() {
        let activity = Contract::insert(&ACTIVITIES);
        assert_eq!(
            names(&activity),
            vec![
                "description",
                "modality",
                "componentId",
                "deliveryDate",
                "realizationDate",
                "observation"
            ]
        );
        assert_eq!(names(&Contract::insert(&HOLIDAYS)), vec!["name", "date"]);
    }

    #[test]
    fn nullable_fields_are_optional_on_insert() {
        let contract = Contract::insert(&CURRICULAR_COMPONENTS);
        let required: Vec<_> = contract
            .rules
            .iter()
            .filter(|r| r.required)
            .map(|r| r.field.name)
            .collect();
        assert_eq!(required, vec!["name", "startDate", "endDate", "color", "weekDays"]);
    }

    #[test]
    fn partial_contract_requires_nothing() {
        let contract = Contract::partial(&CURRICULAR_COMPONENTS);
        assert!(contract.rules.iter().all(|r| !r.required));
        assert_eq!(contract.rules.len(), 7);
    }

    #[test]
    fn activity_status_contract_rejects_null() {
        let contract = Contract::activity_status();
        assert_eq!(names(&contract), vec!["status", "observation"]);
        assert!(contract.rules.iter().all(|r| !r.nullable && !r.required));
    }
}
