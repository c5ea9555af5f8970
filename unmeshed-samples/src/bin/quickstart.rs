use serde_json::json;
use tracing::{error, info};
use unmeshed_client::UnmeshedClient;
use unmeshed_common::{
    ApiCallType, ClientConfig, ProcessData, ProcessRequestData, ProcessSearchRequest, WorkRequest,
};
use unmeshed_samples::{logging, sample_registry, workers};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let config = ClientConfig::from_env().map_err(|e| {
        error!("UNMESHED_AUTH_ID and UNMESHED_AUTH_TOKEN must be set: {e}");
        e
    })?;

    let mut client = UnmeshedClient::new(config);
    client.set_workers(sample_registry());
    info!(workers = ?client.registered_workers(), "Registered sample workers");

    let smoke = WorkRequest {
        step_namespace: workers::NAMESPACE.to_string(),
        step_name: workers::ARITHMETIC_OPERATION.to_string(),
        step_ref: "local_smoke".to_string(),
        input_param: json!({"operation": "add", "num1": 2, "num2": 3})
            .as_object()
            .cloned()
            .unwrap_or_default(),
        ..Default::default()
    };
    let response = client.execute_locally(&smoke)?;
    info!("Local worker smoke run: {:?} {:?}", response.status, response.output);

    info!("Running some other sample APIs:");

    let request = ProcessRequestData::new("default", "testing")
        .with_input(json!({"abc": "pqr"}).as_object().cloned().unwrap_or_default())
        .with_correlation_id("abcd")
        .with_request_id("req-001");

    let async_result = client.run_process_async(&request).await?;
    info!("Process : {:?}", async_result);
    info!("Async output (empty until the process completes): {:?}", async_result.output);

    let sync_result = client.run_process_sync(&request).await?;
    info!("Process : {:?}", sync_result);
    info!("Sync output: {:?}", sync_result.output);

    let my_input = json!({"myInput": "input1"}).as_object().cloned().unwrap_or_default();
    let get_sync = client
        .invoke_api_mapping_get("testing", "api-call-001", "api-call-crid-001", ApiCallType::Sync)
        .await?;
    info!("API Call output: {}", get_sync);
    let post_sync = client
        .invoke_api_mapping_post("testing", "api-call-001", "api-call-crid-001", &my_input, ApiCallType::Sync)
        .await?;
    info!("API Call output: {}", post_sync);
    let get_async = client
        .invoke_api_mapping_get("testing", "api-call-001", "api-call-crid-001", ApiCallType::Async)
        .await?;
    info!("API Call output: {}", get_async);
    let post_async = client
        .invoke_api_mapping_post("testing", "api-call-001", "api-call-crid-001", &my_input, ApiCallType::Async)
        .await?;
    info!("API Call output: {}", post_async);

    let process_ids = [
        process_id_of(&post_sync),
        process_id_of(&get_sync),
        process_id_of(&get_async),
        process_id_of(&post_async),
        Some(sync_result.process_id),
        Some(async_result.process_id),
    ];
    for process_id in process_ids.into_iter().flatten() {
        print_process_data(&client.get_process_data(process_id, true).await?);
    }

    let found = client.search_process_executions(&ProcessSearchRequest::default()).await?;
    info!("Search process executions: {:?}", found);

    Ok(())
}

fn process_id_of(response: &serde_json::Value) -> Option<u64> {
    response.get("processId").and_then(serde_json::Value::as_u64)
}

fn print_process_data(data: &ProcessData) {
    info!("Process data: {:?}", data);
    info!("Process data output: {:?}", data.output);
}
