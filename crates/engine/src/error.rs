//! Engine-level error types.

use nodes::NodeType;
use thiserror::Error;

/// Errors produced by graph validation and handler resolution.
///
/// Nothing here ever escapes [`crate::ExecutionEngine::execute`]: during a
/// run these surface only as message text on the failing result entry, so
/// callers always receive a structured log.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The graph has no node of type `trigger`; it cannot be executed.
    #[error("no trigger node found in workflow")]
    NoTriggerNode,

    /// Two or more nodes share the same ID.
    #[error("duplicate node id: '{0}'")]
    DuplicateNodeId(String),

    /// An edge references a node ID that doesn't exist in the graph.
    #[error("edge '{edge_id}' references unknown node '{node_id}'")]
    DanglingEdge { edge_id: String, node_id: String },

    /// `(type, category)` has no registered handler.
    #[error("no handler registered for {node_type}/{category}")]
    UnknownHandler {
        node_type: NodeType,
        category: String,
    },
}
