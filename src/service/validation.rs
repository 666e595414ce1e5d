//! Request validation against contracts derived from entity declarations.

use crate::error::{IssueCode, PathSegment, ValidationErrors, ValidationIssue};
use crate::schema::{Contract, EntitySchema, FieldDef, FieldKind, Rule};
use crate::sql::FieldValue;
use serde_json::Value;

/// A body that passed a contract: typed values for the fields present, in declaration order.
#[derive(Clone, Debug)]
pub struct ValidatedInput {
    pub schema: &'static EntitySchema,
    pub values: Vec<(&'static FieldDef, FieldValue)>,
}

impl ValidatedInput {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(f, _)| f.name == name)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set a server-controlled value, replacing any existing one.
    pub fn force(&mut self, name: &str, value: FieldValue) {
        let Some(field) = self.schema.field(name) else {
            return;
        };
        self.values.retain(|(f, _)| f.name != name);
        self.values.push((field, value));
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check the body against every rule, collecting all failures. Keys outside the contract are dropped.
    pub fn validate(contract: &Contract, body: &Value) -> Result<ValidatedInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let Some(obj) = body.as_object() else {
            errors.push(ValidationIssue {
                code: IssueCode::InvalidType,
                path: Vec::new(),
                expected: "object",
                received: type_name_of_json(body),
                message: format!("Expected object, received {}", type_name_of_json(body)),
            });
            return Err(errors);
        };

        let mut values = Vec::new();
        for rule in &contract.rules {
            match obj.get(rule.field.name) {
                None => {
                    if rule.required {
                        errors.push(missing(rule));
                    }
                }
                Some(v) => match convert(rule, v) {
                    Ok(value) => values.push((rule.field, value)),
                    Err(issues) => issues.into_iter().for_each(|i| errors.push(i)),
                },
            }
        }

        if errors.is_empty() {
            Ok(ValidatedInput {
                schema: contract.schema,
                values,
            })
        } else {
            Err(errors)
        }
    }
}

fn missing(rule: &Rule) -> ValidationIssue {
    ValidationIssue {
        code: IssueCode::Missing,
        path: vec![PathSegment::from(rule.field.name)],
        expected: rule.field.kind.expected(),
        received: "undefined",
        message: "Required".into(),
    }
}

fn wrong_type(rule: &Rule, received: &'static str) -> ValidationIssue {
    let expected = rule.field.kind.expected();
    ValidationIssue {
        code: IssueCode::InvalidType,
        path: vec![PathSegment::from(rule.field.name)],
        expected,
        received,
        message: format!("Expected {}, received {}", expected, received),
    }
}

/// Every issue for one field: a single one for scalars, one per bad element for arrays.
fn convert(rule: &Rule, v: &Value) -> Result<FieldValue, Vec<ValidationIssue>> {
    if v.is_null() {
        return if rule.nullable {
            Ok(FieldValue::Null(rule.field.kind))
        } else {
            Err(vec![wrong_type(rule, "null")])
        };
    }
    match rule.field.kind {
        FieldKind::Text => v
            .as_str()
            .map(|s| FieldValue::Text(s.to_string()))
            .ok_or_else(|| vec![wrong_type(rule, type_name_of_json(v))]),
        FieldKind::Integer => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(FieldValue::Integer)
            .ok_or_else(|| vec![wrong_type(rule, number_kind(v))]),
        FieldKind::TextArray => {
            let items = v
                .as_array()
                .ok_or_else(|| vec![wrong_type(rule, type_name_of_json(v))])?;
            let mut strings = Vec::with_capacity(items.len());
            let mut issues = Vec::new();
            for (index, item) in items.iter().enumerate() {
                match item.as_str() {
                    Some(s) => strings.push(s.to_string()),
                    None => issues.push(item_issue(rule, index, item)),
                }
            }
            if issues.is_empty() {
                Ok(FieldValue::TextArray(strings))
            } else {
                Err(issues)
            }
        }
    }
}

fn item_issue(rule: &Rule, index: usize, item: &Value) -> ValidationIssue {
    let received = type_name_of_json(item);
    ValidationIssue {
        code: IssueCode::InvalidType,
        path: vec![PathSegment::from(rule.field.name), PathSegment::from(index)],
        expected: "string",
        received,
        message: format!("Expected string, received {}", received),
    }
}

/// Distinguish fractional and out-of-range numbers from other wrong types.
fn number_kind(v: &Value) -> &'static str {
    match v {
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "bigint",
        other => type_name_of_json(other),
    }
}

fn type_name_of_json(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
