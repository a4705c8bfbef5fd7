//! In-memory execution log store.
//!
//! Keeps finished logs addressable by run ID for later inspection. The
//! store is process-lifetime state shared across concurrent runs; durable
//! persistence belongs to an external collaborator. `list` returns logs in
//! insertion order, oldest first.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::ExecutionLog;

#[derive(Debug, Default)]
pub struct LogStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    order: Vec<String>,
    logs: HashMap<String, ExecutionLog>,
}

impl LogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a log by run ID.
    pub fn put(&self, log: ExecutionLog) {
        let mut inner = self.inner.write().unwrap();
        if !inner.logs.contains_key(&log.id) {
            inner.order.push(log.id.clone());
        }
        inner.logs.insert(log.id.clone(), log);
    }

    pub fn get(&self, id: &str) -> Option<ExecutionLog> {
        self.inner.read().unwrap().logs.get(id).cloned()
    }

    /// All logs, oldest first.
    pub fn list(&self) -> Vec<ExecutionLog> {
        let inner = self.inner.read().unwrap();
        inner
            .order
            .iter()
            .filter_map(|id| inner.logs.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
