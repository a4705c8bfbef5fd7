//! Handler-level error type.

use thiserror::Error;

/// Errors returned by a handler's `execute` method.
///
/// Every variant is fatal to the run: the engine records the message on the
/// failing node's result entry and halts the traversal. Handlers that want
/// "no output" semantics return `Ok(Value::Null)` instead of an error.
#[derive(Debug, Error, Clone)]
pub enum HandlerError {
    /// The node's config is missing a required key or is malformed.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The handler's own work failed (e.g. a simulated network failure).
    #[error("handler failed: {0}")]
    Failed(String),
}
