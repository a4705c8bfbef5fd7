//! `engine` crate — graph model, execution-order resolution, the execution
//! engine, and the in-memory execution log store.

pub mod error;
pub mod executor;
pub mod graph;
pub mod models;
pub mod store;
pub mod traversal;

pub use error::EngineError;
pub use executor::ExecutionEngine;
pub use graph::validate_graph;
pub use models::{
    ExecutionLog, ExecutionResult, ResultStatus, RunStatus, WorkflowEdge, WorkflowGraph,
    WorkflowNode,
};
pub use store::LogStore;
pub use traversal::execution_order;

#[cfg(test)]
mod executor_tests;
