//! `MockHandler` — a test double for `NodeHandler`.
//!
//! Useful in unit and integration tests where a real handler implementation
//! is either unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{Config, HandlerError, NodeHandler};

/// Behaviour injected into `MockHandler` at construction time.
pub enum MockBehaviour {
    /// Return a specific JSON value, tagged with the handler's name.
    ReturnValue(Value),
    /// Return the input unchanged.
    Echo,
    /// Fail with a `HandlerError::Failed`.
    Fail(String),
}

/// A mock handler that records every input it receives and returns a
/// programmer-specified result.
pub struct MockHandler {
    /// Label used in test assertions.
    pub name: String,
    /// What the handler will do when `execute` is called.
    pub behaviour: MockBehaviour,
    calls: Arc<Mutex<Vec<Value>>>,
}

impl MockHandler {
    /// Create a mock that always succeeds with the given value.
    pub fn returning(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            behaviour: MockBehaviour::ReturnValue(value),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that passes its input through unchanged.
    pub fn echoing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behaviour: MockBehaviour::Echo,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always fails.
    pub fn failing(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behaviour: MockBehaviour::Fail(msg.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times this handler has been executed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All inputs seen by this handler, in call order.
    pub fn inputs(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeHandler for MockHandler {
    async fn execute(&self, _config: &Config, input: Value) -> Result<Value, HandlerError> {
        self.calls.lock().unwrap().push(input.clone());

        match &self.behaviour {
            MockBehaviour::ReturnValue(value) => {
                // Merge the configured fields over a name tag so tests can
                // trace which handler produced the data.
                let mut out = json!({ "node": self.name });
                if let (Some(out_obj), Some(value_obj)) = (out.as_object_mut(), value.as_object())
                {
                    for (key, field) in value_obj {
                        out_obj.insert(key.clone(), field.clone());
                    }
                }
                Ok(out)
            }
            MockBehaviour::Echo => Ok(input),
            MockBehaviour::Fail(msg) => Err(HandlerError::Failed(msg.clone())),
        }
    }
}
