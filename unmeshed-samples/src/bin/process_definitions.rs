use std::process;

use tracing::{info, warn};
use unmeshed_client::UnmeshedClient;
use unmeshed_common::ClientConfig;
use unmeshed_samples::definitions::{test_process_definition, updated_test_process_definition, TEST_PROCESS};
use unmeshed_samples::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            warn!(
                "{e}. Please ensure you have the following environment variables set:\n  \
                 * UNMESHED_AUTH_ID\n  * UNMESHED_AUTH_TOKEN\n  * UNMESHED_ENGINE_HOST\n  * UNMESHED_ENGINE_PORT"
            );
            process::exit(1);
        }
    };

    let config = ClientConfig {
        work_request_batch_size: 2000,
        response_submit_batch_size: 2000,
        initial_delay_millis: 50,
        step_timeout_millis: Some(30_000),
        ..config
    };
    let client = UnmeshedClient::new(config);

    let created = client.create_new_process_definition(&test_process_definition()).await?;
    info!("Created process definition : {:?}", created);

    let latest = client
        .get_process_definition_latest_or_version("default", TEST_PROCESS, None)
        .await?;
    info!("Fetched process definition latest or version : {:?}", latest);

    info!("Fetched all process definitions : {:?}", client.get_all_process_definitions().await?);

    let updated = client.update_process_definition(&updated_test_process_definition()).await?;
    info!("Updated process definition : {:?}", updated);

    let response = client.delete_process_definitions(&[updated], None).await?;
    info!("Deleted process definition : {}", response);

    Ok(())
}
