use std::num::NonZeroU64;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use unmeshed_client::UnmeshedClient;
use unmeshed_common::ClientConfig;
use unmeshed_load_tests::report;
use unmeshed_load_tests::summary::{validate_percentile, Summarizer};
use unmeshed_load_tests::worker::{self, LoadConfig};
use unmeshed_load_tests::workload::RequestTemplate;

#[derive(Parser)]
#[command(name = "unmeshed-load", about = "Fire synchronous process runs at an Unmeshed engine and report latency")]
struct Args {
    /// Total number of synchronous process runs
    #[arg(long, default_value_t = 50_000)]
    requests: usize,

    /// Runs in flight at once
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..))]
    concurrency: u32,

    /// Namespace of the process to run
    #[arg(long, default_value = "default")]
    namespace: String,

    /// Name of the process to run
    #[arg(long, default_value = "testing")]
    process_name: String,

    /// Stop waiting for outstanding runs after this many seconds (default: wait forever)
    #[arg(long)]
    max_wait_secs: Option<u64>,

    /// Seconds the worker pool gets to drain before partial results are reported
    #[arg(long, default_value_t = 30)]
    grace_secs: u64,

    /// Percentiles to report, each in (0, 100]
    #[arg(long, value_delimiter = ',', default_value = "50,75,95", value_parser = validate_percentile)]
    percentiles: Vec<f64>,

    /// Width of the start/completion histogram buckets in milliseconds
    #[arg(long, default_value = "60000")]
    bucket_width_ms: NonZeroU64,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder().with_env_filter(filter).init();

    let args = Args::parse();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        error!("Failed to load client configuration: {e}");
        process::exit(3);
    });
    info!(engine = %config.engine_url(), "Using Unmeshed engine");

    let client = Arc::new(UnmeshedClient::new(config));
    let template = RequestTemplate::new(args.namespace.clone(), args.process_name.clone());

    let load_config = LoadConfig {
        total_requests: args.requests,
        concurrency: args.concurrency,
        max_wait: args.max_wait_secs.map(Duration::from_secs),
        grace_period: Duration::from_secs(args.grace_secs),
    };

    info!(
        requests = args.requests,
        concurrency = args.concurrency,
        process = %format!("{}/{}", args.namespace, args.process_name),
        "Starting load run"
    );

    let run = worker::run(load_config, move |iteration| {
        let client = Arc::clone(&client);
        let request = template.build(iteration, &mut rand::thread_rng());
        async move { client.run_process_sync(&request).await }
    })
    .await;

    info!(
        completed = run.completed,
        failures = run.failures,
        elapsed_secs = run.elapsed_secs,
        "Load run finished"
    );

    let summary = Summarizer::new(args.percentiles, args.bucket_width_ms).summarize(&run.samples);
    print!("{}", report::render(&summary, run.failures));

    process::exit(run.exit_code());
}
