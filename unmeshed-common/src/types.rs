//! Wire types shared by the client, the sample workers and the load harness.
//!
//! Field names follow the engine's camelCase JSON.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type JsonMap = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    Running,
    Completed,
    Failed,
    TimedOut,
    Cancelled,
    Terminated,
    Reviewed,
}

impl ProcessStatus {
    /// `true` once the process can no longer change state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProcessStatus::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    Standard,
    Dynamic,
    ApiOrchestration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepType {
    Worker,
    Http,
    Noop,
    Wait,
    Fail,
    Python,
    Javascript,
    Json,
    Switch,
    Parallel,
    Foreach,
    Loop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Pending,
    Scheduled,
    Running,
    Completed,
    Failed,
    TimedOut,
    Cancelled,
}

/// How an API mapping invocation waits for its process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiCallType {
    Sync,
    Async,
    Stream,
}

impl ApiCallType {
    pub fn as_name(&self) -> &'static str {
        match self {
            ApiCallType::Sync => "SYNC",
            ApiCallType::Async => "ASYNC",
            ApiCallType::Stream => "STREAM",
        }
    }
}

/// Request to start a process execution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequestData {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default)]
    pub input: JsonMap,
}

impl ProcessRequestData {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_input(mut self, input: JsonMap) -> Self {
        self.input = input;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }
}

/// One step execution inside a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepData {
    pub id: u64,
    pub process_id: u64,
    #[serde(default)]
    pub ref_name: Option<String>,
    #[serde(default)]
    pub status: Option<StepStatus>,
    #[serde(default)]
    pub input: JsonMap,
    #[serde(default)]
    pub output: JsonMap,
}

/// Snapshot of a process execution as reported by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessData {
    pub process_id: u64,
    #[serde(default)]
    pub process_type: Option<ProcessType>,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    pub status: ProcessStatus,
    #[serde(default)]
    pub input: JsonMap,
    /// Empty while the process is still running.
    #[serde(default)]
    pub output: JsonMap,
    #[serde(default)]
    pub step_records: Vec<StepData>,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub updated: Option<u64>,
}

/// Filters for a process search. Unset fields do not constrain the result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_epoch: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time_epoch: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub process_types: Vec<ProcessType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub process_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub correlation_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<ProcessStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDefinition {
    pub name: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input: JsonMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    pub namespace: String,
    pub name: String,
    pub version: u32,
    #[serde(rename = "type")]
    pub process_type: ProcessType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

/// A unit of work handed to a worker for one step execution.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRequest {
    pub process_id: u64,
    pub step_id: u64,
    pub step_execution_id: u64,
    pub step_namespace: String,
    pub step_name: String,
    pub step_ref: String,
    #[serde(default)]
    pub input_param: JsonMap,
}

impl WorkRequest {
    /// Registry key of the worker this request is addressed to.
    pub fn worker_key(&self) -> String {
        format!("{}/{}", self.step_namespace, self.step_name)
    }
}

/// Outcome of a worker run for one step execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkResponse {
    pub process_id: u64,
    pub step_id: u64,
    pub step_execution_id: u64,
    pub status: StepStatus,
    #[serde(default)]
    pub output: JsonMap,
}
