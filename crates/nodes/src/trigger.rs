//! Built-in trigger handlers.
//!
//! A trigger is the entry point of a run; its handler receives the raw
//! trigger input the caller supplied and produces the first piece of data
//! flowing through the graph.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{Config, HandlerError, NodeHandler};

/// `trigger/webhook` — echoes the run's trigger input.
pub struct WebhookTrigger;

#[async_trait]
impl NodeHandler for WebhookTrigger {
    async fn execute(&self, _config: &Config, input: Value) -> Result<Value, HandlerError> {
        Ok(json!({ "triggered": true, "data": input }))
    }
}

/// `trigger/schedule` — fires with the current timestamp.
pub struct ScheduleTrigger;

#[async_trait]
impl NodeHandler for ScheduleTrigger {
    async fn execute(&self, _config: &Config, _input: Value) -> Result<Value, HandlerError> {
        Ok(json!({
            "triggered": true,
            "timestamp": chrono::Utc::now().timestamp_millis(),
        }))
    }
}
