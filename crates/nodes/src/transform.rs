//! Built-in transform handlers.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{Config, HandlerError, NodeHandler};

/// `transform/data_mapper` — applies `config.mappings` on top of the input.
///
/// For each `(key, source)` entry the output gets `input[source]` when
/// `source` names an existing input key, otherwise the literal `source`
/// value itself. Unmapped input keys pass through untouched.
pub struct DataMapper;

#[async_trait]
impl NodeHandler for DataMapper {
    async fn execute(&self, config: &Config, input: Value) -> Result<Value, HandlerError> {
        let mut mapped = match &input {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        };

        if let Some(Value::Object(mappings)) = config.get("mappings") {
            for (key, source) in mappings {
                let resolved = source
                    .as_str()
                    .and_then(|source_key| input.get(source_key))
                    .cloned()
                    .unwrap_or_else(|| source.clone());
                mapped.insert(key.clone(), resolved);
            }
        }

        Ok(Value::Object(mapped))
    }
}

/// `transform/filter` — passes the input through when `input[field]`
/// satisfies the comparison, otherwise yields `null`.
///
/// A `null` output means "no data", not an error: filtering out is success.
/// A missing field or an unrecognized operator passes the input through.
pub struct Filter;

#[async_trait]
impl NodeHandler for Filter {
    async fn execute(&self, config: &Config, input: Value) -> Result<Value, HandlerError> {
        let Some(field) = config.get("field").and_then(Value::as_str) else {
            return Ok(input);
        };
        let expected = config.get("value").unwrap_or(&Value::Null);
        let operator = config.get("operator").and_then(Value::as_str);

        let keep = match input.get(field) {
            None => true,
            Some(actual) => match operator {
                Some("equals") => actual == expected,
                Some("contains") => text(actual).contains(&text(expected)),
                _ => true,
            },
        };

        Ok(if keep { input } else { Value::Null })
    }
}

/// Plain-text rendering for `contains`: strings compare unquoted, anything
/// else via its JSON form.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
