use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;
use unmeshed_common::{JsonMap, Result, StepStatus, UnmeshedError, WorkRequest, WorkResponse};

/// A function that executes one step of a process.
///
/// A returned `Err` fails the step; it does not fail the caller.
pub trait Worker: Send + Sync {
    fn execute(&self, request: &WorkRequest) -> Result<Value>;
}

impl<F> Worker for F
where
    F: Fn(&WorkRequest) -> Result<Value> + Send + Sync,
{
    fn execute(&self, request: &WorkRequest) -> Result<Value> {
        self(request)
    }
}

/// Named workers, keyed by `namespace/name`.
#[derive(Clone, Default)]
pub struct WorkerRegistry {
    workers: BTreeMap<String, Arc<dyn Worker>>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `worker` under `namespace/name`, replacing any previous registration.
    pub fn register<W: Worker + 'static>(&mut self, namespace: &str, name: &str, worker: W) {
        self.workers.insert(format!("{namespace}/{name}"), Arc::new(worker));
    }

    pub fn names(&self) -> Vec<String> {
        self.workers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Execute the worker addressed by `request`.
    ///
    /// Returns `WorkerNotFound` when no worker matches. A worker error is turned
    /// into a `Failed` response carrying `{"error": <message>}`.
    pub fn execute(&self, request: &WorkRequest) -> Result<WorkResponse> {
        let key = request.worker_key();
        let worker = self
            .workers
            .get(&key)
            .ok_or_else(|| UnmeshedError::WorkerNotFound(key.clone()))?;

        let (status, output) = match worker.execute(request) {
            Ok(value) => (StepStatus::Completed, into_output(value)),
            Err(e) => {
                warn!(worker = %key, step_id = request.step_id, error = %e, "worker failed");
                let message = match e {
                    UnmeshedError::WorkerFailed(msg) => msg,
                    other => other.to_string(),
                };
                (StepStatus::Failed, into_output(json!({ "error": message })))
            }
        };

        Ok(WorkResponse {
            process_id: request.process_id,
            step_id: request.step_id,
            step_execution_id: request.step_execution_id,
            status,
            output,
        })
    }
}

/// Objects are used as-is; any other value is wrapped as `{"result": value}`.
fn into_output(value: Value) -> JsonMap {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = JsonMap::new();
            map.insert("result".to_string(), other);
            map
        }
    }
}
