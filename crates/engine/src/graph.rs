//! Graph validation — run this before persisting or executing a workflow.
//!
//! Rules enforced:
//! 1. Node IDs must be unique within the graph.
//! 2. Every edge must reference existing node IDs (source and target).
//! 3. At least one node must be a trigger.
//!
//! Cycles are deliberately *not* rejected: traversal visits each node at
//! most once, so a cycle terminates instead of looping. The engine also
//! survives unvalidated graphs — dangling edges are skipped mid-walk and a
//! missing trigger fails the run — but rejecting bad documents at the
//! boundary gives callers a typed error instead of a failed log.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::models::WorkflowGraph;

/// Validate the workflow graph's shape.
///
/// # Errors
/// - [`EngineError::DuplicateNodeId`] if two nodes share an ID.
/// - [`EngineError::DanglingEdge`] if an edge references a missing node.
/// - [`EngineError::NoTriggerNode`] if no node has `type = trigger`.
pub fn validate_graph(graph: &WorkflowGraph) -> Result<(), EngineError> {
    let mut seen_ids: HashSet<&str> = HashSet::new();
    for node in &graph.nodes {
        if !seen_ids.insert(node.id.as_str()) {
            return Err(EngineError::DuplicateNodeId(node.id.clone()));
        }
    }

    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !seen_ids.contains(endpoint.as_str()) {
                return Err(EngineError::DanglingEdge {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
    }

    if graph.find_trigger().is_none() {
        return Err(EngineError::NoTriggerNode);
    }

    Ok(())
}
