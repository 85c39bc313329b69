// src/logging.rs
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder};

/// Filter used when `RUST_LOG` is unset, by `-v` count.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "wb_scrape=info",
        1 => "wb_scrape=debug",
        _ => "wb_scrape=trace,reqwest=debug",
    }
}

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
