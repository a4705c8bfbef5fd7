//! The `NodeHandler` trait — the contract every node handler must fulfil.

use async_trait::async_trait;
use serde_json::Value;

use crate::HandlerError;

/// Node configuration: the JSON object stored on the node, passed verbatim
/// to its handler.
pub type Config = serde_json::Map<String, Value>;

/// The core handler trait.
///
/// `input` is the output of the node's predecessor in the walk (for the
/// trigger node itself, the run's trigger input). Handlers may suspend —
/// the engine awaits each one to completion before the next node starts.
#[async_trait]
pub trait NodeHandler: Send + Sync {
    async fn execute(&self, config: &Config, input: Value) -> Result<Value, HandlerError>;
}
