//! Core domain models for the workflow engine.
//!
//! These types are the wire shape of a workflow graph and of a finished
//! run. They serialize to/from the camelCase JSON documents produced by the
//! visual editor (and by the AI generation collaborator) and consumed by
//! the dashboard; round-tripping through `serde_json` is lossless.

use chrono::Utc;
use nodes::{Config, NodeType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A complete workflow graph: nodes plus directed edges.
///
/// Edge order is significant — it is the sibling visitation order during
/// the depth-first walk. The graph is read-only for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
}

impl WorkflowGraph {
    /// First node with `type = trigger`, in node order.
    pub fn find_trigger(&self) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.node_type == NodeType::Trigger)
    }

    /// Node lookup by ID.
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Edges leaving `node_id`, preserving the graph's edge order.
    pub fn outgoing_edges<'a>(
        &'a self,
        node_id: &'a str,
    ) -> impl Iterator<Item = &'a WorkflowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}

/// A single node in the workflow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    /// Unique identifier within the graph (referenced by edges).
    pub id: String,
    /// Node kind; selects the handler family.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Concrete handler within the kind (e.g. `webhook`, `send_email`).
    pub category: String,
    /// Arbitrary configuration passed verbatim to the handler.
    #[serde(default)]
    pub config: Config,
    /// Canvas position; presentation-only, irrelevant to execution.
    #[serde(default)]
    pub position: Position,
}

/// Canvas coordinates from the visual editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Directed edge from one node to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Presentation-only line style.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    /// Branch tag (`"true"`/`"false"`) matched against a condition node's
    /// computed branch; absent means the edge is always followed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
}

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Terminal state of a single node visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
    Skipped,
}

/// One entry per node visited during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub node_id: String,
    pub status: ResultStatus,
    /// Present iff the node succeeded. A successful `null` means "no data"
    /// (e.g. a filter that dropped its input).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Present iff the node failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Node start time, epoch milliseconds.
    pub timestamp: i64,
    /// Wall-clock execution time in milliseconds.
    pub duration: u64,
}

impl ExecutionResult {
    pub(crate) fn success(node_id: &str, output: Value, timestamp: i64, duration: u64) -> Self {
        Self {
            node_id: node_id.to_owned(),
            status: ResultStatus::Success,
            output: Some(output),
            error: None,
            timestamp,
            duration,
        }
    }

    pub(crate) fn error(
        node_id: &str,
        message: impl Into<String>,
        timestamp: i64,
        duration: u64,
    ) -> Self {
        Self {
            node_id: node_id.to_owned(),
            status: ResultStatus::Error,
            output: None,
            error: Some(message.into()),
            timestamp,
            duration,
        }
    }
}

/// Lifecycle state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

/// The full record of one workflow run.
///
/// Created in the `running` state, mutated in place as nodes complete, and
/// finalized to a terminal status. Owned exclusively by the engine for the
/// run's duration; handed to the [`crate::LogStore`] once finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLog {
    /// Unique run ID.
    pub id: String,
    pub workflow_id: String,
    pub status: RunStatus,
    /// Run start, epoch milliseconds.
    pub start_time: i64,
    /// Set when the run reaches a terminal status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// The trigger input the run was started with.
    pub input: Value,
    /// Per-node results in visitation order.
    pub results: Vec<ExecutionResult>,
}

impl ExecutionLog {
    pub(crate) fn begin(workflow_id: &str, input: Value) -> Self {
        Self {
            id: format!("exec_{}", Uuid::new_v4().simple()),
            workflow_id: workflow_id.to_owned(),
            status: RunStatus::Running,
            start_time: Utc::now().timestamp_millis(),
            end_time: None,
            input,
            results: Vec::new(),
        }
    }

    pub(crate) fn finish(&mut self, status: RunStatus) {
        self.status = status;
        self.end_time = Some(Utc::now().timestamp_millis());
    }
}
