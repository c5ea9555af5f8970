use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Install a formatting subscriber. `RUST_LOG` overrides `default_directive`.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = FmtSubscriber::builder().with_env_filter(filter).try_init();
}
