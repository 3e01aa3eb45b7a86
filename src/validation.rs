//! Schema validation of configuration values.
//!
//! Checks a `serde_json::Value` against a [`Schema`]: presence of required
//! attributes and blocks, value types, and the [`Validator`]s attached to
//! each attribute. Every problem becomes an attribute-level error diagnostic.
//!
//! # Example
//!
//! ```
//! use terraform_provider_leaseweb::schema::{Attribute, Schema, Validator};
//! use terraform_provider_leaseweb::validation::validate;
//! use serde_json::json;
//!
//! let schema = Schema::v0().with_attribute(
//!     "root_disk_size",
//!     Attribute::optional_int64().with_validator(Validator::between(5, 1000)),
//! );
//!
//! assert!(validate(&schema, &json!({"root_disk_size": 50})).is_empty());
//!
//! let diagnostics = validate(&schema, &json!({"root_disk_size": 1}));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     diagnostics[0].detail.as_deref(),
//!     Some("Attribute root_disk_size value must be between 5 and 1000, got: 1")
//! );
//! ```

use crate::schema::{
    Attribute, AttributeType, Block, BlockNestingMode, Diagnostic, DiagnosticSeverity, NestedBlock,
    Schema, Validator,
};
use serde_json::{Map, Value};

/// Validate a JSON value against a schema.
///
/// Returns a list of diagnostics for any validation errors found.
/// An empty list means the value is valid.
///
/// # Validation Rules
///
/// - Required attributes must be present and non-null
/// - Computed-only attributes and blocks are skipped
/// - Attribute types must match the schema
/// - Validators run on every non-null value
/// - Nested blocks are validated recursively with min/max item constraints
pub fn validate(schema: &Schema, value: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    validate_block(&schema.block, value, "", &mut diagnostics);
    diagnostics
}

/// Validate a JSON value against a schema, returning Ok if valid or Err with diagnostics.
pub fn validate_result(schema: &Schema, value: &Value) -> Result<(), Vec<Diagnostic>> {
    let diagnostics = validate(schema, value);
    if diagnostics.is_empty() {
        Ok(())
    } else {
        Err(diagnostics)
    }
}

/// Check if a JSON value is valid against a schema.
pub fn is_valid(schema: &Schema, value: &Value) -> bool {
    validate(schema, value).is_empty()
}

fn validate_block(block: &Block, value: &Value, path: &str, diagnostics: &mut Vec<Diagnostic>) {
    let obj = match value {
        Value::Object(map) => map,
        Value::Null => return,
        _ => {
            diagnostics.push(
                Diagnostic::error("Expected object")
                    .with_detail(format!("Got {}", value_type_name(value)))
                    .with_attribute_if_not_empty(path),
            );
            return;
        },
    };

    for (name, attr) in &block.attributes {
        let attr_path = join_path(path, name);
        validate_attribute(attr, obj, name, &attr_path, diagnostics);
    }

    for (name, nested_block) in &block.blocks {
        if nested_block.computed {
            continue;
        }
        let block_path = join_path(path, name);
        validate_nested_block(nested_block, obj.get(name), &block_path, diagnostics);
    }
}

fn validate_attribute(
    attr: &Attribute,
    parent: &Map<String, Value>,
    name: &str,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if attr.flags.is_computed_only() {
        return;
    }

    match parent.get(name) {
        None | Some(Value::Null) => {
            if attr.flags.required {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required attribute '{}'", path))
                        .with_detail("This attribute is required and must be provided")
                        .with_attribute(path),
                );
            }
        },
        Some(v) => {
            let before = diagnostics.len();
            validate_attribute_type(&attr.attr_type, v, path, diagnostics);
            if diagnostics.len() == before {
                for validator in &attr.validators {
                    if let Some(diagnostic) = run_validator(validator, v, parent, path) {
                        diagnostics.push(diagnostic);
                    }
                }
            }
        },
    }
}

fn validate_attribute_type(
    attr_type: &AttributeType,
    value: &Value,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match attr_type {
        AttributeType::String => {
            if !value.is_string() {
                diagnostics.push(type_error(path, "string", value));
            }
        },
        AttributeType::Int64 => {
            if !is_int64(value) {
                diagnostics.push(type_error(path, "int64", value));
            }
        },
        AttributeType::Float64 => {
            if !value.is_number() {
                diagnostics.push(type_error(path, "float64", value));
            }
        },
        AttributeType::Bool => {
            if !value.is_boolean() {
                diagnostics.push(type_error(path, "bool", value));
            }
        },
        AttributeType::List(element_type) => {
            if let Some(arr) = value.as_array() {
                for (i, elem) in arr.iter().enumerate() {
                    let elem_path = format!("{}.{}", path, i);
                    validate_attribute_type(element_type, elem, &elem_path, diagnostics);
                }
            } else {
                diagnostics.push(type_error(path, "list", value));
            }
        },
    }
}

fn validate_nested_block(
    nested: &NestedBlock,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match nested.nesting_mode {
        BlockNestingMode::Single => validate_single_block(nested, value, path, diagnostics),
        BlockNestingMode::List => validate_list_block(nested, value, path, diagnostics),
    }
}

fn validate_single_block(
    nested: &NestedBlock,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        None | Some(Value::Null) => {
            if nested.min_items > 0 {
                diagnostics.push(
                    Diagnostic::error(format!("Missing required block '{}'", path))
                        .with_detail("This block is required and must be provided")
                        .with_attribute(path),
                );
            }
        },
        Some(v) => validate_block(&nested.block, v, path, diagnostics),
    }
}

fn validate_list_block(
    nested: &NestedBlock,
    value: Option<&Value>,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match value {
        None | Some(Value::Null) => {
            if nested.min_items > 0 {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s)",
                        path, nested.min_items
                    ))
                    .with_attribute(path),
                );
            }
        },
        Some(Value::Array(arr)) => {
            let len = arr.len() as u32;

            if len < nested.min_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' requires at least {} item(s), got {}",
                        path, nested.min_items, len
                    ))
                    .with_attribute(path),
                );
            }

            // 0 means unlimited
            if nested.max_items > 0 && len > nested.max_items {
                diagnostics.push(
                    Diagnostic::error(format!(
                        "Block '{}' allows at most {} item(s), got {}",
                        path, nested.max_items, len
                    ))
                    .with_attribute(path),
                );
            }

            for (i, item) in arr.iter().enumerate() {
                let item_path = format!("{}.{}", path, i);
                validate_block(&nested.block, item, &item_path, diagnostics);
            }
        },
        Some(v) => {
            diagnostics.push(
                Diagnostic::error(format!("Expected list for block '{}'", path))
                    .with_detail(format!("Got {}", value_type_name(v)))
                    .with_attribute(path),
            );
        },
    }
}

/// Run a single validator against a known value.
///
/// `parent` is the object holding the attribute, used to resolve siblings.
pub fn run_validator(
    validator: &Validator,
    value: &Value,
    parent: &Map<String, Value>,
    path: &str,
) -> Option<Diagnostic> {
    match validator {
        Validator::StringOneOf(allowed) => {
            let got = value.as_str()?;
            if allowed.iter().any(|a| a == got) {
                return None;
            }
            let quoted: Vec<String> = allowed.iter().map(|a| format!("{:?}", a)).collect();
            Some(invalid_value(
                "Invalid Attribute Value Match",
                path,
                format!(
                    "Attribute {} value must be one of: [{}], got: {:?}",
                    path,
                    quoted.join(" "),
                    got
                ),
            ))
        },
        Validator::Int64OneOf(allowed) => {
            let got = value.as_i64()?;
            if allowed.contains(&got) {
                return None;
            }
            let listed: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
            Some(invalid_value(
                "Invalid Attribute Value Match",
                path,
                format!(
                    "Attribute {} value must be one of: [{}], got: {}",
                    path,
                    listed.join(" "),
                    got
                ),
            ))
        },
        Validator::Int64Between { min, max } => {
            let got = value.as_i64()?;
            if (*min..=*max).contains(&got) {
                return None;
            }
            Some(invalid_value(
                "Invalid Attribute Value",
                path,
                format!(
                    "Attribute {} value must be between {} and {}, got: {}",
                    path, min, max, got
                ),
            ))
        },
        Validator::StringLengthAtLeast(min) => {
            let length = value.as_str()?.chars().count();
            if length >= *min {
                return None;
            }
            Some(invalid_value(
                "Invalid Attribute Value Length",
                path,
                format!(
                    "Attribute {} string length must be at least {}, got: {}",
                    path, min, length
                ),
            ))
        },
        Validator::AlsoRequires(siblings) => {
            let parent_path = path.rsplit_once('.').map(|(p, _)| p).unwrap_or("");
            siblings
                .iter()
                .find(|s| parent.get(s.as_str()).map_or(true, Value::is_null))
                .map(|missing| {
                    Diagnostic::error("Invalid Attribute Combination")
                        .with_detail(format!(
                            "Attribute {:?} must be specified when {:?} is specified",
                            join_path(parent_path, missing),
                            path
                        ))
                        .with_attribute(path)
                })
        },
        Validator::GreaterThanZero => {
            let got = value.as_str()?;
            match got.trim().parse::<f64>() {
                Ok(number) if number.is_finite() && number > 0.0 => None,
                _ => Some(invalid_value(
                    "Invalid Attribute Value",
                    path,
                    format!(
                        "Attribute {} value must be a number greater than 0, got: {:?}",
                        path, got
                    ),
                )),
            }
        },
    }
}

fn invalid_value(summary: &str, path: &str, detail: String) -> Diagnostic {
    Diagnostic::error(summary)
        .with_detail(detail)
        .with_attribute(path)
}

// Helper functions

pub(crate) fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_int64(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            if n.as_i64().is_some() {
                true
            } else if let Some(f) = n.as_f64() {
                f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64
            } else {
                false
            }
        },
        _ => false,
    }
}

fn type_error(path: &str, expected: &str, got: &Value) -> Diagnostic {
    Diagnostic {
        severity: DiagnosticSeverity::Error,
        summary: format!("Invalid type for attribute '{}'", path),
        detail: Some(format!(
            "Expected {}, got {}",
            expected,
            value_type_name(got)
        )),
        attribute: Some(path.to_string()),
    }
}

trait DiagnosticExt {
    fn with_attribute_if_not_empty(self, path: &str) -> Self;
}

impl DiagnosticExt for Diagnostic {
    fn with_attribute_if_not_empty(self, path: &str) -> Self {
        if path.is_empty() {
            self
        } else {
            self.with_attribute(path)
        }
    }
}
