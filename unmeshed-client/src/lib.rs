use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use unmeshed_common::{
    ApiCallType, ClientConfig, ErrorResponse, JsonMap, ProcessData, ProcessDefinition, ProcessRequestData,
    ProcessSearchRequest, Result, UnmeshedError, WorkRequest, WorkResponse,
};
use uuid::Uuid;

pub mod workers;

pub use workers::{Worker, WorkerRegistry};

/// Unmeshed engine client
pub struct UnmeshedClient {
    pub config: ClientConfig,
    /// `{base_url}:{port}`; every request path is appended to this.
    engine_url: String,
    http_client: reqwest::Client,
    workers: WorkerRegistry,
}

impl UnmeshedClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        let engine_url = config.engine_url();
        Self {
            config,
            engine_url,
            http_client: reqwest::Client::new(),
            workers: WorkerRegistry::new(),
        }
    }

    /// Build the absolute URL for an API path (which must start with `/`).
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.engine_url, path)
    }

    /// Value of the `Authorization` header sent with every request.
    pub fn authorization_header(&self) -> String {
        format!("Bearer client.sdk.{}.{}", self.config.auth_id, self.config.auth_token)
    }

    // --- Workers ---

    /// Register `worker` under `namespace/name`, replacing any previous registration.
    pub fn register_worker<W: Worker + 'static>(&mut self, namespace: &str, name: &str, worker: W) {
        self.workers.register(namespace, name, worker);
    }

    /// Replace the whole worker registry.
    pub fn set_workers(&mut self, workers: WorkerRegistry) {
        self.workers = workers;
    }

    /// Sorted `namespace/name` keys of every registered worker.
    pub fn registered_workers(&self) -> Vec<String> {
        self.workers.names()
    }

    /// Run a work request against the local registry without involving the engine.
    pub fn execute_locally(&self, request: &WorkRequest) -> Result<WorkResponse> {
        self.workers.execute(request)
    }

    // --- Process execution ---

    /// Start a process and wait for it to finish.
    pub async fn run_process_sync(&self, request: &ProcessRequestData) -> Result<ProcessData> {
        self.run_process("/api/process/runSync", request).await
    }

    /// Start a process and return immediately; `output` is empty until it completes.
    pub async fn run_process_async(&self, request: &ProcessRequestData) -> Result<ProcessData> {
        self.run_process("/api/process/runAsync", request).await
    }

    async fn run_process(&self, path: &str, request: &ProcessRequestData) -> Result<ProcessData> {
        let request = with_request_id(request);
        let what = format!("process {}/{}", request.namespace, request.name);
        let builder = self.request(Method::POST, path).json(&request);
        self.send_json(builder, &what).await
    }

    /// Fetch the current state of a process execution.
    pub async fn get_process_data(&self, process_id: u64, include_steps: bool) -> Result<ProcessData> {
        let builder = self
            .request(Method::GET, &format!("/api/process/context/{process_id}"))
            .query(&[("includeSteps", include_steps)]);
        self.send_json(builder, &format!("process {process_id}")).await
    }

    pub async fn search_process_executions(&self, search: &ProcessSearchRequest) -> Result<Vec<ProcessData>> {
        let builder = self.request(Method::POST, "/api/process/search").json(search);
        self.send_json(builder, "process search").await
    }

    // --- API mappings ---

    pub async fn invoke_api_mapping_get(
        &self,
        endpoint: &str,
        request_id: &str,
        correlation_id: &str,
        call_type: ApiCallType,
    ) -> Result<Value> {
        let builder = self.api_mapping_request(Method::GET, endpoint, request_id, correlation_id, call_type);
        self.send_json(builder, &format!("api mapping {endpoint}")).await
    }

    pub async fn invoke_api_mapping_post(
        &self,
        endpoint: &str,
        request_id: &str,
        correlation_id: &str,
        input: &JsonMap,
        call_type: ApiCallType,
    ) -> Result<Value> {
        let builder = self
            .api_mapping_request(Method::POST, endpoint, request_id, correlation_id, call_type)
            .json(input);
        self.send_json(builder, &format!("api mapping {endpoint}")).await
    }

    fn api_mapping_request(
        &self,
        method: Method,
        endpoint: &str,
        request_id: &str,
        correlation_id: &str,
        call_type: ApiCallType,
    ) -> RequestBuilder {
        self.request(method, &format!("/api/call/{endpoint}")).query(&[
            ("id", request_id),
            ("correlationId", correlation_id),
            ("apiCallType", call_type.as_name()),
        ])
    }

    // --- Process definitions ---

    pub async fn create_new_process_definition(&self, definition: &ProcessDefinition) -> Result<ProcessDefinition> {
        let builder = self.request(Method::POST, "/api/processDefinitions").json(definition);
        self.send_json(builder, &definition_label(definition)).await
    }

    /// Fetch `version` of a definition, or the latest one when `version` is `None`.
    pub async fn get_process_definition_latest_or_version(
        &self,
        namespace: &str,
        name: &str,
        version: Option<u32>,
    ) -> Result<ProcessDefinition> {
        let mut builder = self.request(Method::GET, &format!("/api/processDefinitions/{namespace}/{name}"));
        if let Some(v) = version {
            builder = builder.query(&[("version", v)]);
        }
        self.send_json(builder, &format!("process definition {namespace}/{name}")).await
    }

    pub async fn get_all_process_definitions(&self) -> Result<Vec<ProcessDefinition>> {
        let builder = self.request(Method::GET, "/api/processDefinitions");
        self.send_json(builder, "process definitions").await
    }

    pub async fn update_process_definition(&self, definition: &ProcessDefinition) -> Result<ProcessDefinition> {
        let builder = self.request(Method::PUT, "/api/processDefinitions").json(definition);
        self.send_json(builder, &definition_label(definition)).await
    }

    /// Delete the given definitions. With `version_only` set, only the listed versions go.
    pub async fn delete_process_definitions(
        &self,
        definitions: &[ProcessDefinition],
        version_only: Option<bool>,
    ) -> Result<Value> {
        let mut builder = self.request(Method::DELETE, "/api/processDefinitions").json(definitions);
        if let Some(flag) = version_only {
            builder = builder.query(&[("versionOnly", flag)]);
        }
        self.send_json(builder, "process definitions").await
    }

    // --- Transport ---

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http_client
            .request(method, self.build_url(path))
            .header("Authorization", self.authorization_header())
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| UnmeshedError::NetworkError(e.to_string()))?;

        let status = response.status();
        debug!(%status, what, "engine responded");
        if !status.is_success() {
            return Err(parse_error_response(status, what, response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UnmeshedError::NetworkError(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| UnmeshedError::Decode(e.to_string()))
    }
}

/// Copy of `request` that is guaranteed to carry a request id.
fn with_request_id(request: &ProcessRequestData) -> ProcessRequestData {
    let mut request = request.clone();
    if request.request_id.is_none() {
        request.request_id = Some(Uuid::new_v4().to_string());
    }
    request
}

fn definition_label(definition: &ProcessDefinition) -> String {
    format!(
        "process definition {}/{} v{}",
        definition.namespace, definition.name, definition.version
    )
}

async fn parse_error_response(status: StatusCode, what: &str, response: reqwest::Response) -> UnmeshedError {
    if status == StatusCode::NOT_FOUND {
        return UnmeshedError::NotFound(what.to_string());
    }

    let error_msg = response
        .json::<ErrorResponse>()
        .await
        .map(|r| r.error)
        .unwrap_or_else(|_| format!("Engine returned status: {}", status));

    UnmeshedError::HttpError(status.as_u16(), error_msg)
}
