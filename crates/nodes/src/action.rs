//! Built-in action handlers.
//!
//! These are stand-ins for real integrations: given valid config they
//! return a structured acknowledgment payload. Swapping one for an
//! implementation that performs the real side effect only changes the
//! handler body, not the engine.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::{Config, HandlerError, NodeHandler};

fn str_or<'a>(config: &'a Config, key: &str, default: &'a str) -> &'a str {
    config.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// `action/send_email`.
pub struct SendEmail;

#[async_trait]
impl NodeHandler for SendEmail {
    async fn execute(&self, config: &Config, _input: Value) -> Result<Value, HandlerError> {
        let to = str_or(config, "to", "recipient@example.com");
        let subject = str_or(config, "subject", "Test Email");
        debug!(to, subject, "sending email");

        Ok(json!({
            "sent": true,
            "to": to,
            "subject": subject,
            "messageId": format!("msg_{}", chrono::Utc::now().timestamp_millis()),
        }))
    }
}

/// `action/http_request`.
pub struct HttpRequest;

#[async_trait]
impl NodeHandler for HttpRequest {
    async fn execute(&self, config: &Config, _input: Value) -> Result<Value, HandlerError> {
        let method = str_or(config, "method", "GET");
        let url = config.get("url").cloned().unwrap_or(Value::Null);
        debug!(method, "performing http request");

        Ok(json!({
            "status": 200,
            "data": { "success": true, "url": url },
            "method": method,
        }))
    }
}

/// `action/slack_message`.
pub struct SlackMessage;

#[async_trait]
impl NodeHandler for SlackMessage {
    async fn execute(&self, config: &Config, _input: Value) -> Result<Value, HandlerError> {
        let channel = str_or(config, "channel", "#general");
        let message = str_or(config, "message", "Hello from workflow!");
        debug!(channel, "posting slack message");

        Ok(json!({
            "posted": true,
            "channel": channel,
            "message": message,
            "ts": chrono::Utc::now().timestamp_millis(),
        }))
    }
}
