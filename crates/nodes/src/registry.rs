//! Handler registry: resolves a node's `(type, category)` pair to a handler.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::{HttpRequest, SendEmail, SlackMessage};
use crate::condition::IfElse;
use crate::transform::{DataMapper, Filter};
use crate::trigger::{ScheduleTrigger, WebhookTrigger};
use crate::{NodeHandler, NodeType};

/// Maps `(NodeType, category)` to a shared handler.
///
/// Categories are open-ended strings; an unknown pair is a lookup miss,
/// never a panic. The engine decides what a miss means (fatal for the
/// trigger node, pass-through downstream).
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<(NodeType, String), Arc<dyn NodeHandler>>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every built-in handler.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(NodeType::Trigger, "webhook", Arc::new(WebhookTrigger));
        registry.register(NodeType::Trigger, "schedule", Arc::new(ScheduleTrigger));
        registry.register(NodeType::Action, "send_email", Arc::new(SendEmail));
        registry.register(NodeType::Action, "http_request", Arc::new(HttpRequest));
        registry.register(NodeType::Action, "slack_message", Arc::new(SlackMessage));
        registry.register(NodeType::Transform, "data_mapper", Arc::new(DataMapper));
        registry.register(NodeType::Transform, "filter", Arc::new(Filter));
        registry.register(NodeType::Condition, "if_else", Arc::new(IfElse));
        registry
    }

    /// Register (or replace) the handler for a `(type, category)` pair.
    pub fn register(
        &mut self,
        node_type: NodeType,
        category: impl Into<String>,
        handler: Arc<dyn NodeHandler>,
    ) {
        self.handlers.insert((node_type, category.into()), handler);
    }

    /// Look up the handler for a pair, if one is registered.
    pub fn lookup(&self, node_type: NodeType, category: &str) -> Option<Arc<dyn NodeHandler>> {
        self.handlers.get(&(node_type, category.to_owned())).cloned()
    }

    pub fn contains(&self, node_type: NodeType, category: &str) -> bool {
        self.handlers.contains_key(&(node_type, category.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
