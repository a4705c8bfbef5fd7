//! Workflow execution engine.
//!
//! `ExecutionEngine` orchestrates a single run end-to-end:
//! 1. Opens an `ExecutionLog` in the `running` state.
//! 2. Locates and executes the trigger node with the run's input.
//! 3. Drives the depth-first walk, dispatching each node through the
//!    handler registry and feeding outputs forward as inputs.
//! 4. Records a per-node `ExecutionResult` with status, output, and timing.
//! 5. Finalizes the log to a terminal status and hands it to the store.
//!
//! `execute` never returns an error: every failure is represented as log
//! state, so an HTTP or CLI caller can always render a structured
//! response. A handler failure is fatal to the run — traversal halts
//! immediately and the log's results are a strict prefix of the full
//! walk. An unknown handler is fatal only on the trigger node; downstream
//! it degrades to a pass-through no-op. Failed nodes are not retried.
//!
//! A run is strictly sequential: each handler is awaited to completion
//! before the next frame is popped, even across independent branches.
//! Concurrent runs are independent — each owns its log and visited set —
//! and meet only at the internally synchronized `LogStore`.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use nodes::{HandlerRegistry, NodeHandler};

use crate::error::EngineError;
use crate::models::{ExecutionLog, ExecutionResult, RunStatus, WorkflowGraph, WorkflowNode};
use crate::store::LogStore;
use crate::traversal::Walk;

/// Synthetic result entry for failures that precede any node execution.
const WORKFLOW_PSEUDO_NODE: &str = "workflow";

/// The run orchestrator. Explicitly constructed — no process-wide
/// instance — so independent engines (one per test, say) don't interfere.
pub struct ExecutionEngine {
    registry: Arc<HandlerRegistry>,
    store: Arc<LogStore>,
}

impl ExecutionEngine {
    /// Engine with its own fresh log store.
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self::with_store(registry, Arc::new(LogStore::new()))
    }

    /// Engine sharing an existing log store.
    pub fn with_store(registry: Arc<HandlerRegistry>, store: Arc<LogStore>) -> Self {
        Self { registry, store }
    }

    pub fn store(&self) -> &Arc<LogStore> {
        &self.store
    }

    /// Run one workflow execution end-to-end and return the finished log.
    #[instrument(skip_all, fields(workflow_id = %workflow_id))]
    pub async fn execute(
        &self,
        workflow_id: &str,
        graph: &WorkflowGraph,
        trigger_input: Value,
    ) -> ExecutionLog {
        let mut log = ExecutionLog::begin(workflow_id, trigger_input.clone());
        info!(run_id = %log.id, "starting workflow execution");

        let Some(trigger) = graph.find_trigger() else {
            error!("workflow has no trigger node");
            log.results.push(ExecutionResult::error(
                WORKFLOW_PSEUDO_NODE,
                EngineError::NoTriggerNode.to_string(),
                Utc::now().timestamp_millis(),
                0,
            ));
            return self.finish(log, RunStatus::Failed);
        };

        let mut walk = Walk::new(graph);
        walk.mark_visited(&trigger.id);

        // The trigger runs first, directly; a trigger without a handler
        // cannot start the run, so the miss is fatal here.
        let trigger_output = match self.registry.lookup(trigger.node_type, &trigger.category) {
            Some(handler) => {
                match self.run_node(trigger, handler, trigger_input, &mut log).await {
                    Some(output) => output,
                    None => return self.finish(log, RunStatus::Failed),
                }
            }
            None => {
                let err = EngineError::UnknownHandler {
                    node_type: trigger.node_type,
                    category: trigger.category.clone(),
                };
                error!(node = %trigger.id, "{err}");
                log.results.push(ExecutionResult::error(
                    &trigger.id,
                    err.to_string(),
                    Utc::now().timestamp_millis(),
                    0,
                ));
                return self.finish(log, RunStatus::Failed);
            }
        };
        walk.expand(&trigger.id, &trigger_output);

        while let Some(frame) = walk.next_frame() {
            // The walk only schedules existing targets; re-check rather
            // than trust the stack if the graph is inconsistent.
            let Some(node) = graph.node(&frame.node_id) else {
                continue;
            };

            match self.registry.lookup(node.node_type, &node.category) {
                Some(handler) => {
                    match self.run_node(node, handler, frame.input, &mut log).await {
                        Some(output) => walk.expand(&node.id, &output),
                        None => return self.finish(log, RunStatus::Failed),
                    }
                }
                None => {
                    // Downstream of the trigger an unknown handler is a
                    // pass-through no-op: best-effort automation degrades
                    // instead of failing the whole run.
                    let err = EngineError::UnknownHandler {
                        node_type: node.node_type,
                        category: node.category.clone(),
                    };
                    warn!(node = %node.id, "{err}; passing input through");
                    log.results.push(ExecutionResult::success(
                        &node.id,
                        frame.input.clone(),
                        Utc::now().timestamp_millis(),
                        0,
                    ));
                    walk.expand(&node.id, &frame.input);
                }
            }
        }

        info!(run_id = %log.id, nodes = log.results.len(), "workflow execution completed");
        self.finish(log, RunStatus::Completed)
    }

    /// Execute one node's handler, recording its result on the log.
    ///
    /// Returns the node's output, or `None` if the handler failed (fatal
    /// to the run).
    async fn run_node(
        &self,
        node: &WorkflowNode,
        handler: Arc<dyn NodeHandler>,
        input: Value,
        log: &mut ExecutionLog,
    ) -> Option<Value> {
        let timestamp = Utc::now().timestamp_millis();
        let clock = Instant::now();
        info!(node = %node.id, node_type = %node.node_type, category = %node.category, "executing node");

        match handler.execute(&node.config, input).await {
            Ok(output) => {
                let duration = clock.elapsed().as_millis() as u64;
                log.results.push(ExecutionResult::success(
                    &node.id, output.clone(), timestamp, duration,
                ));
                Some(output)
            }
            Err(err) => {
                let duration = clock.elapsed().as_millis() as u64;
                error!(node = %node.id, "node failed: {err}");
                log.results.push(ExecutionResult::error(
                    &node.id, err.to_string(), timestamp, duration,
                ));
                None
            }
        }
    }

    fn finish(&self, mut log: ExecutionLog, status: RunStatus) -> ExecutionLog {
        log.finish(status);
        self.store.put(log.clone());
        log
    }
}
