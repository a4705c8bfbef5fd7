//! End-to-end tests for the execution engine.
//!
//! These run against the live depth-first walk (the documented traversal
//! shape): a node receives the output of its actual immediate predecessor,
//! and converging paths are dropped after the first arrival.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use nodes::mock::MockHandler;
use nodes::{HandlerRegistry, NodeType};

use crate::models::{ResultStatus, RunStatus, WorkflowEdge, WorkflowGraph, WorkflowNode};
use crate::ExecutionEngine;

fn node(id: &str, node_type: NodeType, category: &str) -> WorkflowNode {
    WorkflowNode {
        id: id.to_string(),
        node_type,
        category: category.to_string(),
        config: Map::new(),
        position: Default::default(),
    }
}

fn node_with_config(id: &str, node_type: NodeType, category: &str, config: Value) -> WorkflowNode {
    WorkflowNode {
        config: match config {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        ..node(id, node_type, category)
    }
}

fn edge(id: &str, source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        edge_type: None,
        source_handle: None,
    }
}

fn tagged_edge(id: &str, source: &str, target: &str, handle: &str) -> WorkflowEdge {
    WorkflowEdge {
        source_handle: Some(handle.to_string()),
        ..edge(id, source, target)
    }
}

fn graph(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> WorkflowGraph {
    WorkflowGraph { nodes, edges }
}

fn result_node_ids(log: &crate::ExecutionLog) -> Vec<&str> {
    log.results.iter().map(|r| r.node_id.as_str()).collect()
}

// ============================================================
// Trigger resolution
// ============================================================

#[tokio::test]
async fn missing_trigger_fails_without_invoking_any_handler() {
    let mut registry = HandlerRegistry::new();
    let mock = Arc::new(MockHandler::returning("noop", json!({})));
    registry.register(NodeType::Action, "noop", mock.clone());
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(vec![node("a", NodeType::Action, "noop")], vec![]);
    let log = engine.execute("wf-no-trigger", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Failed);
    assert!(log.end_time.is_some());
    assert_eq!(result_node_ids(&log), vec!["workflow"]);
    assert!(log.results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("no trigger node"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn empty_graph_fails_with_synthetic_result() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let log = engine
        .execute("wf-empty", &WorkflowGraph::default(), json!({}))
        .await;

    assert_eq!(log.status, RunStatus::Failed);
    assert_eq!(log.results.len(), 1);
    assert_eq!(log.results[0].node_id, "workflow");
    assert_eq!(log.results[0].status, ResultStatus::Error);
}

#[tokio::test]
async fn unknown_trigger_handler_is_fatal() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let g = graph(vec![node("t", NodeType::Trigger, "bogus")], vec![]);

    let log = engine.execute("wf-bad-trigger", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Failed);
    assert_eq!(result_node_ids(&log), vec!["t"]);
    assert!(log.results[0]
        .error
        .as_deref()
        .unwrap()
        .contains("no handler registered"));
}

// ============================================================
// Happy paths with the built-in handlers
// ============================================================

#[tokio::test]
async fn trigger_only_graph_completes() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let g = graph(vec![node("t", NodeType::Trigger, "webhook")], vec![]);

    let log = engine.execute("wf-solo", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(log.results.len(), 1);
    assert_eq!(log.results[0].status, ResultStatus::Success);
    assert_eq!(
        log.results[0].output,
        Some(json!({ "triggered": true, "data": {} }))
    );
}

#[tokio::test]
async fn webhook_to_email_pipeline() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let g = graph(
        vec![
            node("t", NodeType::Trigger, "webhook"),
            node_with_config(
                "email",
                NodeType::Action,
                "send_email",
                json!({ "to": "a@b.com", "subject": "Hi" }),
            ),
        ],
        vec![edge("e1", "t", "email")],
    );

    let log = engine.execute("wf-email", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(log.results.len(), 2);
    assert!(log.results.iter().all(|r| r.status == ResultStatus::Success));

    let ack = log.results[1].output.as_ref().unwrap();
    assert_eq!(ack["sent"], true);
    assert_eq!(ack["to"], "a@b.com");
}

#[tokio::test]
async fn filter_dropping_data_is_success_not_error() {
    // An echoing trigger hands the raw input straight to the filter.
    let mut registry = HandlerRegistry::builtin();
    registry.register(
        NodeType::Trigger,
        "manual",
        Arc::new(MockHandler::echoing("manual")),
    );
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "manual"),
            node_with_config(
                "f",
                NodeType::Transform,
                "filter",
                json!({ "field": "x", "operator": "equals", "value": 5 }),
            ),
        ],
        vec![edge("e1", "t", "f")],
    );

    let log = engine.execute("wf-filter", &g, json!({ "x": 3 })).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(log.results[1].status, ResultStatus::Success);
    assert_eq!(log.results[1].output, Some(Value::Null));
}

// ============================================================
// Error propagation and halting
// ============================================================

#[tokio::test]
async fn handler_failure_halts_the_run() {
    let mut registry = HandlerRegistry::new();
    let start = Arc::new(MockHandler::returning("start", json!({ "ok": true })));
    let boom = Arc::new(MockHandler::failing("boom", "something broke irreparably"));
    let never = Arc::new(MockHandler::returning("never", json!({})));
    registry.register(NodeType::Trigger, "start", start);
    registry.register(NodeType::Action, "boom", boom);
    registry.register(NodeType::Action, "never", never.clone());
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "start"),
            node("b", NodeType::Action, "boom"),
            node("n", NodeType::Action, "never"),
        ],
        vec![edge("e1", "t", "b"), edge("e2", "b", "n")],
    );

    let log = engine.execute("wf-boom", &g, json!({})).await;

    // Results are a strict prefix: everything up to and including the
    // failing node, nothing after it.
    assert_eq!(log.status, RunStatus::Failed);
    assert_eq!(result_node_ids(&log), vec!["t", "b"]);
    assert_eq!(log.results[1].status, ResultStatus::Error);
    assert!(log.results[1]
        .error
        .as_deref()
        .unwrap()
        .contains("something broke irreparably"));
    assert_eq!(never.call_count(), 0);
}

#[tokio::test]
async fn trigger_failure_fails_the_run_with_one_result() {
    let mut registry = HandlerRegistry::new();
    registry.register(
        NodeType::Trigger,
        "start",
        Arc::new(MockHandler::failing("start", "trigger exploded")),
    );
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(vec![node("t", NodeType::Trigger, "start")], vec![]);
    let log = engine.execute("wf-trigger-fail", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Failed);
    assert_eq!(result_node_ids(&log), vec!["t"]);
}

// ============================================================
// Traversal semantics through the engine
// ============================================================

#[tokio::test]
async fn diamond_executes_converging_node_once_with_first_arrivals_output() {
    let mut registry = HandlerRegistry::new();
    let start = Arc::new(MockHandler::returning("start", json!({})));
    let a = Arc::new(MockHandler::returning("a", json!({})));
    let b = Arc::new(MockHandler::returning("b", json!({})));
    let c = Arc::new(MockHandler::echoing("c"));
    registry.register(NodeType::Trigger, "start", start);
    registry.register(NodeType::Action, "a", a);
    registry.register(NodeType::Action, "b", b);
    registry.register(NodeType::Action, "c", c.clone());
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "start"),
            node("a", NodeType::Action, "a"),
            node("b", NodeType::Action, "b"),
            node("c", NodeType::Action, "c"),
        ],
        vec![
            edge("e1", "t", "a"),
            edge("e2", "t", "b"),
            edge("e3", "a", "c"),
            edge("e4", "b", "c"),
        ],
    );

    let log = engine.execute("wf-diamond", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    // Depth-first pre-order with first-occurrence-wins: c is reached
    // through a, so b's converging edge is dropped.
    assert_eq!(result_node_ids(&log), vec!["t", "a", "c", "b"]);
    assert_eq!(c.call_count(), 1);
    assert_eq!(c.inputs()[0]["node"], "a");
}

#[tokio::test]
async fn cyclic_graph_terminates() {
    let mut registry = HandlerRegistry::new();
    registry.register(
        NodeType::Trigger,
        "start",
        Arc::new(MockHandler::returning("start", json!({}))),
    );
    registry.register(
        NodeType::Action,
        "step",
        Arc::new(MockHandler::echoing("step")),
    );
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "start"),
            node("a", NodeType::Action, "step"),
            node("b", NodeType::Action, "step"),
        ],
        vec![
            edge("e1", "t", "a"),
            edge("e2", "a", "b"),
            edge("e3", "b", "a"),
        ],
    );

    let log = engine.execute("wf-cycle", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(result_node_ids(&log), vec!["t", "a", "b"]);
}

// ============================================================
// Unknown downstream handlers
// ============================================================

#[tokio::test]
async fn unknown_downstream_handler_passes_input_through() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let g = graph(
        vec![
            node("t", NodeType::Trigger, "webhook"),
            node("x", NodeType::Action, "nonexistent_category"),
        ],
        vec![edge("e1", "t", "x")],
    );

    let log = engine.execute("wf-unknown", &g, json!({ "k": 1 })).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(log.results.len(), 2);
    assert_eq!(log.results[1].status, ResultStatus::Success);
    // Pass-through: the node's output is its input, unchanged.
    assert_eq!(log.results[1].output, log.results[0].output);
}

#[tokio::test]
async fn pass_through_node_keeps_its_successors_running() {
    let mut registry = HandlerRegistry::builtin();
    let tail = Arc::new(MockHandler::echoing("tail"));
    registry.register(NodeType::Action, "tail", tail.clone());
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "webhook"),
            node("x", NodeType::Action, "nonexistent_category"),
            node("end", NodeType::Action, "tail"),
        ],
        vec![edge("e1", "t", "x"), edge("e2", "x", "end")],
    );

    let log = engine.execute("wf-unknown-chain", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(result_node_ids(&log), vec!["t", "x", "end"]);
    // The tail receives the trigger output the unknown node passed along.
    assert_eq!(tail.inputs()[0], json!({ "triggered": true, "data": {} }));
}

// ============================================================
// Condition branching
// ============================================================

#[tokio::test]
async fn tagged_edges_follow_the_computed_branch() {
    let mut registry = HandlerRegistry::builtin();
    registry.register(
        NodeType::Trigger,
        "manual",
        Arc::new(MockHandler::echoing("manual")),
    );
    let yes = Arc::new(MockHandler::echoing("yes"));
    let no = Arc::new(MockHandler::echoing("no"));
    registry.register(NodeType::Action, "yes", yes.clone());
    registry.register(NodeType::Action, "no", no.clone());
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "manual"),
            node_with_config(
                "cond",
                NodeType::Condition,
                "if_else",
                json!({ "condition": true }),
            ),
            node("yes", NodeType::Action, "yes"),
            node("no", NodeType::Action, "no"),
        ],
        vec![
            edge("e1", "t", "cond"),
            tagged_edge("e2", "cond", "yes", "true"),
            tagged_edge("e3", "cond", "no", "false"),
        ],
    );

    let log = engine.execute("wf-branch", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(result_node_ids(&log), vec!["t", "cond", "yes"]);
    assert_eq!(no.call_count(), 0);
}

#[tokio::test]
async fn untagged_edges_visit_both_branches() {
    // Graphs saved before branch tagging: every outgoing edge is followed
    // regardless of the computed branch.
    let mut registry = HandlerRegistry::builtin();
    registry.register(
        NodeType::Trigger,
        "manual",
        Arc::new(MockHandler::echoing("manual")),
    );
    registry.register(
        NodeType::Action,
        "leaf",
        Arc::new(MockHandler::echoing("leaf")),
    );
    let engine = ExecutionEngine::new(Arc::new(registry));

    let g = graph(
        vec![
            node("t", NodeType::Trigger, "manual"),
            node_with_config(
                "cond",
                NodeType::Condition,
                "if_else",
                json!({ "condition": false }),
            ),
            node("yes", NodeType::Action, "leaf"),
            node("no", NodeType::Action, "leaf"),
        ],
        vec![
            edge("e1", "t", "cond"),
            edge("e2", "cond", "yes"),
            edge("e3", "cond", "no"),
        ],
    );

    let log = engine.execute("wf-no-tags", &g, json!({})).await;

    assert_eq!(log.status, RunStatus::Completed);
    assert_eq!(result_node_ids(&log), vec!["t", "cond", "yes", "no"]);
}

// ============================================================
// Timing, storage, and concurrent runs
// ============================================================

#[tokio::test]
async fn durations_fit_within_the_run_window() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let g = graph(
        vec![
            node("t", NodeType::Trigger, "webhook"),
            node("email", NodeType::Action, "send_email"),
        ],
        vec![edge("e1", "t", "email")],
    );

    let log = engine.execute("wf-timing", &g, json!({})).await;

    let end = log.end_time.expect("finalized run has an end time");
    assert!(end >= log.start_time);

    let total: u64 = log.results.iter().map(|r| r.duration).sum();
    // +1 absorbs millisecond rounding between the wall clock and the
    // per-node monotonic measurements.
    assert!(total <= (end - log.start_time) as u64 + 1);
    for result in &log.results {
        assert!(result.timestamp >= log.start_time);
    }
}

#[tokio::test]
async fn finalized_run_is_handed_to_the_store() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let g = graph(vec![node("t", NodeType::Trigger, "webhook")], vec![]);

    let log = engine.execute("wf-stored", &g, json!({})).await;

    assert_eq!(engine.store().len(), 1);
    assert_eq!(engine.store().get(&log.id), Some(log));
}

#[tokio::test]
async fn failed_runs_are_stored_too() {
    let engine = ExecutionEngine::new(Arc::new(HandlerRegistry::builtin()));
    let log = engine
        .execute("wf-fail-stored", &WorkflowGraph::default(), json!({}))
        .await;

    let stored = engine.store().get(&log.id).expect("failed run stored");
    assert_eq!(stored.status, RunStatus::Failed);
}

#[tokio::test]
async fn concurrent_runs_share_the_store_safely() {
    let engine = Arc::new(ExecutionEngine::new(Arc::new(HandlerRegistry::builtin())));
    let g = graph(vec![node("t", NodeType::Trigger, "webhook")], vec![]);

    let (first, second) = tokio::join!(
        engine.execute("wf-one", &g, json!({ "run": 1 })),
        engine.execute("wf-two", &g, json!({ "run": 2 })),
    );

    assert_eq!(first.status, RunStatus::Completed);
    assert_eq!(second.status, RunStatus::Completed);
    assert_ne!(first.id, second.id);
    assert_eq!(engine.store().len(), 2);
}
