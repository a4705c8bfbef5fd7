//! Node kind taxonomy shared by the graph model and the handler registry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four executable node kinds.
///
/// The visual editor also emits an `"ai"` node type; for execution purposes
/// it is an action subtype, so it deserializes as [`NodeType::Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Entry point of a workflow; a run starts at the first trigger node.
    Trigger,
    /// Performs a side effect (email, HTTP call, chat message).
    #[serde(alias = "ai")]
    Action,
    /// Reshapes or filters the data flowing through the run.
    Transform,
    /// Computes a branch decision for downstream edge selection.
    Condition,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Trigger => "trigger",
            NodeType::Action => "action",
            NodeType::Transform => "transform",
            NodeType::Condition => "condition",
        };
        f.write_str(name)
    }
}
