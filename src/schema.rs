//! Validation schemas and their translation to wire field descriptors.
//!
//! A tool may declare an [`InputSchema`]: an ordered list of named fields
//! over a closed set of kinds (string, number, boolean, array, object,
//! plus an optional wrapper). The same declaration drives two things:
//!
//! - **enforcement** — [`InputSchema::validate`] checks a decoded input
//!   value against the declaration (closed schema: undeclared fields are
//!   rejected);
//! - **introspection** — [`translate`] renders the declaration as the
//!   ordered field descriptors served by the schema-query rpc.
//!
//! Translation is pure and order-preserving; declaration order is
//! significant for display consumers, not for validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Field kinds
// =============================================================================

/// Kind of a declared input field.
///
/// A closed tagged union: wire `type` tags map onto these variants and
/// back. `Optional` wraps another kind and carries no type of its own —
/// it only flips the field's required flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Optional(Box<FieldKind>),
}

impl FieldKind {
    /// Wrap a kind in the optional modifier.
    pub fn optional(inner: FieldKind) -> Self {
        FieldKind::Optional(Box::new(inner))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, FieldKind::Optional(_))
    }

    /// Wire `type` tag for this kind. The optional wrapper reports its
    /// inner kind's tag.
    pub fn type_tag(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::Optional(inner) => inner.type_tag(),
        }
    }

    /// Decode a wire `type` tag. Unrecognized tags default to string,
    /// keeping schema display usable against newer peers.
    pub fn from_type_tag(tag: &str) -> Self {
        match tag {
            "number" => FieldKind::Number,
            "boolean" => FieldKind::Boolean,
            "array" => FieldKind::Array,
            "object" => FieldKind::Object,
            _ => FieldKind::String,
        }
    }

    /// Validate a JSON value against this kind.
    pub fn validate_value(&self, value: &Value) -> Result<(), String> {
        match self {
            FieldKind::String => {
                if value.is_string() {
                    Ok(())
                } else {
                    Err(format!("expected string, got {}", value_type_name(value)))
                }
            }
            FieldKind::Number => {
                if value.is_number() {
                    Ok(())
                } else {
                    Err(format!("expected number, got {}", value_type_name(value)))
                }
            }
            FieldKind::Boolean => {
                if value.is_boolean() {
                    Ok(())
                } else {
                    Err(format!("expected boolean, got {}", value_type_name(value)))
                }
            }
            FieldKind::Array => {
                if value.is_array() {
                    Ok(())
                } else {
                    Err(format!("expected array, got {}", value_type_name(value)))
                }
            }
            FieldKind::Object => {
                if value.is_object() {
                    Ok(())
                } else {
                    Err(format!("expected object, got {}", value_type_name(value)))
                }
            }
            FieldKind::Optional(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    inner.validate_value(value)
                }
            }
        }
    }
}

fn value_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Schema declaration
// =============================================================================

/// A single declared input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub description: String,
}

impl FieldDef {
    /// Required unless wrapped in the optional modifier.
    pub fn required(&self) -> bool {
        !self.kind.is_optional()
    }
}

/// Ordered input schema for one tool. Field order is declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    fields: Vec<FieldDef>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare a field. Order of calls is the declared order; redeclaring
    /// a name replaces the earlier definition in place, so a name never
    /// maps to two descriptors.
    pub fn field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        description: impl Into<String>,
    ) -> Self {
        let def = FieldDef {
            name: name.into(),
            kind,
            description: description.into(),
        };
        match self.fields.iter_mut().find(|f| f.name == def.name) {
            Some(existing) => *existing = def,
            None => self.fields.push(def),
        }
        self
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a decoded input value against this schema.
    ///
    /// Returns a list of validation errors (empty = valid); each message
    /// names the offending field. The schema is closed: fields not
    /// declared here are rejected.
    pub fn validate(&self, input: &Value) -> Vec<String> {
        let Some(input_map) = input.as_object() else {
            return vec![format!(
                "input must be a JSON object, got {}",
                value_type_name(input)
            )];
        };

        let mut errors = Vec::new();

        // Check required fields are present
        for field in &self.fields {
            if field.required() && !input_map.contains_key(&field.name) {
                errors.push(format!("missing required field: {}", field.name));
            }
        }

        // Build field name lookup for checking undeclared fields
        let known_names: HashMap<&str, &FieldDef> = self
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f))
            .collect();

        // Validate kinds of provided fields
        for (key, value) in input_map {
            if let Some(field) = known_names.get(key.as_str()) {
                if let Err(e) = field.kind.validate_value(value) {
                    errors.push(format!("field '{}': {}", key, e));
                }
            } else {
                errors.push(format!("unknown field: {}", key));
            }
        }

        errors
    }
}

// =============================================================================
// Wire-level descriptors
// =============================================================================

/// One translated field descriptor as served by the schema-query rpc.
///
/// `kind` is never `Optional` here: the wrapper is folded into the
/// `required` flag and the inner kind's tag during translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub description: String,
}

/// A tool's introspectable schema: name, description, ordered fields.
/// Produced on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub tool_name: String,
    pub description: String,
    pub fields: Vec<SchemaField>,
}

/// Translate a schema declaration into ordered wire field descriptors.
///
/// An absent schema yields an empty sequence. Pure: the same declaration
/// always yields the same descriptors, and the input is never mutated.
pub fn translate(schema: Option<&InputSchema>) -> Vec<SchemaField> {
    let Some(schema) = schema else {
        return Vec::new();
    };

    schema
        .fields()
        .iter()
        .map(|field| {
            let inner = match &field.kind {
                FieldKind::Optional(inner) => inner.as_ref().clone(),
                other => other.clone(),
            };
            SchemaField {
                name: field.name.clone(),
                kind: inner,
                required: field.required(),
                description: field.description.clone(),
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn order_schema() -> InputSchema {
        InputSchema::new()
            .field("zone", FieldKind::String, "Delivery zone")
            .field("quantity", FieldKind::Number, "Item count")
            .field(
                "gift_wrap",
                FieldKind::optional(FieldKind::Boolean),
                "Wrap the order",
            )
            .field("items", FieldKind::Array, "Ordered items")
    }

    #[test]
    fn test_translate_preserves_declaration_order() {
        let fields = translate(Some(&order_schema()));
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zone", "quantity", "gift_wrap", "items"]);
    }

    #[test]
    fn test_translate_is_deterministic() {
        let schema = order_schema();
        assert_eq!(translate(Some(&schema)), translate(Some(&schema)));
    }

    #[test]
    fn test_translate_absent_schema_yields_empty() {
        assert!(translate(None).is_empty());
    }

    #[test]
    fn test_optional_field_reports_inner_kind_and_not_required() {
        let schema = InputSchema::new().field(
            "limit",
            FieldKind::optional(FieldKind::Number),
            "Max results",
        );
        let fields = translate(Some(&schema));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].kind, FieldKind::Number);
        assert_eq!(fields[0].kind.type_tag(), "number");
        assert!(!fields[0].required);
    }

    #[test]
    fn test_required_defaults_to_true() {
        let fields = translate(Some(&order_schema()));
        assert!(fields[0].required);
        assert!(fields[1].required);
        assert!(!fields[2].required);
        assert!(fields[3].required);
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(FieldKind::String.type_tag(), "string");
        assert_eq!(FieldKind::Number.type_tag(), "number");
        assert_eq!(FieldKind::Boolean.type_tag(), "boolean");
        assert_eq!(FieldKind::Array.type_tag(), "array");
        assert_eq!(FieldKind::Object.type_tag(), "object");
        assert_eq!(FieldKind::optional(FieldKind::Array).type_tag(), "array");
    }

    #[test]
    fn test_unrecognized_tag_defaults_to_string() {
        assert_eq!(FieldKind::from_type_tag("int64"), FieldKind::String);
        assert_eq!(FieldKind::from_type_tag(""), FieldKind::String);
        assert_eq!(FieldKind::from_type_tag("number"), FieldKind::Number);
    }

    #[test]
    fn test_validate_accepts_conforming_input() {
        let errors = order_schema().validate(&json!({
            "zone": "north",
            "quantity": 2,
            "items": ["salad", "espresso"],
        }));
        assert!(errors.is_empty(), "expected no errors, got: {:?}", errors);
    }

    #[test]
    fn test_validate_reports_missing_required_field() {
        let errors = order_schema().validate(&json!({
            "zone": "north",
            "items": [],
        }));
        assert_eq!(errors, vec!["missing required field: quantity".to_string()]);
    }

    #[test]
    fn test_validate_reports_kind_mismatch_with_field_name() {
        let schema = InputSchema::new()
            .field("x", FieldKind::Number, "")
            .field("y", FieldKind::Number, "");
        let errors = schema.validate(&json!({"x": "a", "y": 3}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("x"));
        assert!(errors[0].contains("expected number, got string"));
    }

    #[test]
    fn test_validate_rejects_undeclared_field() {
        let errors = order_schema().validate(&json!({
            "zone": "north",
            "quantity": 1,
            "items": [],
            "bogus": true,
        }));
        assert_eq!(errors, vec!["unknown field: bogus".to_string()]);
    }

    #[test]
    fn test_validate_rejects_non_object_input() {
        let errors = order_schema().validate(&json!([1, 2, 3]));
        assert_eq!(
            errors,
            vec!["input must be a JSON object, got array".to_string()]
        );
    }

    #[test]
    fn test_optional_field_accepts_missing_and_null() {
        let schema = order_schema();
        let base = json!({"zone": "n", "quantity": 1, "items": []});
        assert!(schema.validate(&base).is_empty());

        let with_null = json!({"zone": "n", "quantity": 1, "items": [], "gift_wrap": null});
        assert!(schema.validate(&with_null).is_empty());

        let with_value = json!({"zone": "n", "quantity": 1, "items": [], "gift_wrap": true});
        assert!(schema.validate(&with_value).is_empty());

        let with_bad = json!({"zone": "n", "quantity": 1, "items": [], "gift_wrap": 7});
        let errors = schema.validate(&with_bad);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("gift_wrap"));
    }

    #[test]
    fn test_number_accepts_integers_and_floats() {
        let kind = FieldKind::Number;
        assert!(kind.validate_value(&json!(5)).is_ok());
        assert!(kind.validate_value(&json!(-2.75)).is_ok());
        assert!(kind.validate_value(&json!("5")).is_err());
    }

    #[test]
    fn test_array_and_object_are_shape_only() {
        assert!(FieldKind::Array.validate_value(&json!([1, "two", null])).is_ok());
        assert!(FieldKind::Object
            .validate_value(&json!({"anything": [true]}))
            .is_ok());
        assert!(FieldKind::Array.validate_value(&json!({})).is_err());
        assert!(FieldKind::Object.validate_value(&json!([])).is_err());
    }

    #[test]
    fn test_validate_does_not_mutate_input() {
        let schema = order_schema();
        let input = json!({"zone": "n", "quantity": 1, "items": []});
        let snapshot = input.clone();
        let _ = schema.validate(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_redeclared_field_replaces_earlier_definition() {
        let schema = InputSchema::new()
            .field("zone", FieldKind::String, "Delivery zone")
            .field("quantity", FieldKind::Number, "Item count")
            .field("zone", FieldKind::optional(FieldKind::String), "Zone override");

        // One descriptor per name, first position kept, later definition wins
        assert_eq!(schema.len(), 2);
        let fields = translate(Some(&schema));
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zone", "quantity"]);
        assert!(!fields[0].required);
        assert_eq!(fields[0].description, "Zone override");

        // Validation consults the same surviving definition
        assert!(schema.validate(&json!({"quantity": 1})).is_empty());
        let errors = schema.validate(&json!({"zone": 7, "quantity": 1}));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("zone"));
        assert!(errors[0].contains("expected string"));
    }
}
