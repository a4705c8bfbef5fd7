//! Execution-order resolution: depth-first, pre-order, visit-once.
//!
//! Sibling targets are visited in the graph's edge order. A node already
//! visited is neither re-visited nor re-emitted, so a node with several
//! incoming edges runs exactly once — on whichever path reached it first —
//! and cycles terminate naturally. Converging paths are dropped, not
//! merged. The walk keeps an explicit frame stack instead of recursing, so
//! traversal depth is bounded by graph size, not call-stack size.

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::error::EngineError;
use crate::models::{WorkflowEdge, WorkflowGraph};

/// Compute the full visitation order up front, trigger included.
///
/// This is the planning variant used by `validate`-style callers and
/// tests; the engine itself drives [`Walk`], which carries per-branch
/// inputs. Dangling edge targets are skipped.
///
/// # Errors
/// [`EngineError::NoTriggerNode`] if the graph has no trigger.
pub fn execution_order(graph: &WorkflowGraph) -> Result<Vec<String>, EngineError> {
    let trigger = graph.find_trigger().ok_or(EngineError::NoTriggerNode)?;

    let mut visited: HashSet<&str> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut stack: Vec<&str> = vec![trigger.id.as_str()];

    while let Some(node_id) = stack.pop() {
        if !visited.insert(node_id) {
            continue;
        }
        order.push(node_id.to_owned());

        // Reverse push so the first edge's target pops first.
        let successors: Vec<&str> = graph
            .outgoing_edges(node_id)
            .filter(|e| graph.node(&e.target).is_some())
            .map(|e| e.target.as_str())
            .collect();
        for target in successors.into_iter().rev() {
            if !visited.contains(target) {
                stack.push(target);
            }
        }
    }

    Ok(order)
}

/// A pending node execution: the node to run and the input it will receive.
#[derive(Debug)]
pub struct Frame {
    pub node_id: String,
    pub input: Value,
}

/// The live walk the engine drives: pop a frame, execute its node, then
/// [`Walk::expand`] with the node's output to schedule the successors.
///
/// Each frame carries the output of its actual immediate predecessor, so
/// branches stay coupled to their own data. Where paths converge, the
/// first arrival wins and later frames for the same node are dropped.
pub struct Walk<'g> {
    graph: &'g WorkflowGraph,
    stack: Vec<Frame>,
    visited: HashSet<String>,
}

impl<'g> Walk<'g> {
    pub fn new(graph: &'g WorkflowGraph) -> Self {
        Self {
            graph,
            stack: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Mark a node as executed without scheduling it (the trigger, which
    /// the engine runs directly before the walk starts).
    pub fn mark_visited(&mut self, node_id: &str) {
        self.visited.insert(node_id.to_owned());
    }

    /// Schedule `node_id`'s successors, each receiving `output` as input.
    ///
    /// Edges tagged with a `sourceHandle` are followed only when `output`
    /// carries a matching `branch` string; untagged edges always follow,
    /// and tags are ignored when the output has no branch at all, so
    /// graphs saved before branch tagging keep their old behaviour.
    pub fn expand(&mut self, node_id: &str, output: &Value) {
        let branch = output.get("branch").and_then(Value::as_str);
        let followed: Vec<&WorkflowEdge> = self
            .graph
            .outgoing_edges(node_id)
            .filter(|edge| follows_branch(edge, branch))
            .collect();

        for edge in followed.into_iter().rev() {
            if self.visited.contains(&edge.target) {
                continue;
            }
            if self.graph.node(&edge.target).is_none() {
                warn!(edge = %edge.id, target = %edge.target, "skipping dangling edge");
                continue;
            }
            self.stack.push(Frame {
                node_id: edge.target.clone(),
                input: output.clone(),
            });
        }
    }

    /// Pop the next not-yet-executed frame, marking its node visited.
    pub fn next_frame(&mut self) -> Option<Frame> {
        while let Some(frame) = self.stack.pop() {
            if self.visited.insert(frame.node_id.clone()) {
                return Some(frame);
            }
        }
        None
    }
}

fn follows_branch(edge: &WorkflowEdge, branch: Option<&str>) -> bool {
    match (&edge.source_handle, branch) {
        (Some(handle), Some(branch)) => handle == branch,
        _ => true,
    }
}
