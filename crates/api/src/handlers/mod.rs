pub mod executions;
pub mod webhooks;
pub mod workflows;

use engine::{ExecutionLog, RunStatus};
use serde_json::{json, Value};

/// The response shape of the execute and webhook endpoints.
///
/// A failed run reports the message of its last (failing or synthetic)
/// result; a finished run reports its results and wall-clock duration.
pub(crate) fn run_response(log: &ExecutionLog) -> Value {
    let duration = log.end_time.map_or(0, |end| end - log.start_time);
    match log.status {
        RunStatus::Failed => {
            let error = log
                .results
                .iter()
                .rev()
                .find_map(|r| r.error.clone())
                .unwrap_or_else(|| "workflow execution failed".to_owned());
            json!({
                "success": false,
                "error": error,
                "executionId": log.id,
                "duration": duration,
            })
        }
        _ => json!({
            "success": true,
            "executionId": log.id,
            "results": log.results,
            "duration": duration,
        }),
    }
}
