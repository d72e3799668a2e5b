use serde_json::Value;

use crate::errors::{ErrkinError, Result};

/// Merged context payload: an open JSON record keyed by field name
pub type ContextMap = serde_json::Map<String, Value>;

/// Options for `Kind::get_context`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    /// Return the whole merged context (true) or only the querying kind's own fields
    pub include_parent_context: bool,
}

impl ContextOptions {
    /// Restrict the result to the querying kind's own fields
    pub fn own_only() -> Self {
        Self {
            include_parent_context: false,
        }
    }
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            include_parent_context: true,
        }
    }
}

/// Convert a JSON value into a context payload
///
/// # Errors
///
/// Returns `InvalidContext` unless the value is a JSON object.
pub fn context_from_value(value: Value) -> Result<ContextMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ErrkinError::InvalidContext {
            reason: format!("expected a JSON object, got {}", json_type_name(&other)),
        }),
    }
}

/// Copy the named fields present in `context`, in field order
pub(crate) fn pick_fields(context: &ContextMap, fields: &[String]) -> ContextMap {
    fields
        .iter()
        .filter_map(|field| {
            context
                .get(field)
                .map(|value| (field.clone(), value.clone()))
        })
        .collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
