//! Built-in condition handlers.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{Config, HandlerError, NodeHandler};

/// `condition/if_else` — resolves `config.condition` to a branch label.
///
/// The output's `branch` field is matched against the `sourceHandle` tags
/// of outgoing edges during traversal; untagged edges ignore it and are
/// always followed.
pub struct IfElse;

#[async_trait]
impl NodeHandler for IfElse {
    async fn execute(&self, config: &Config, input: Value) -> Result<Value, HandlerError> {
        let condition = truthy(config.get("condition").unwrap_or(&Value::Null));
        Ok(json!({
            "branch": if condition { "true" } else { "false" },
            "input": input,
        }))
    }
}

/// Boolean-ish coercion: null and absent are false, booleans are
/// themselves, numbers by non-zero, strings by non-emptiness, arrays and
/// objects are always true.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
