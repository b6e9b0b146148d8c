//! provides logging helpers

use tracing_subscriber::filter::{self};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// initiate the global tracing subscriber at `INFO` unless `RUST_LOG` says otherwise
pub fn init() {
    init_with_default(filter::LevelFilter::INFO);
}

/// initiate the global tracing subscriber with a caller-chosen default level
///
/// Does nothing if a global subscriber is already installed, so embedding
/// applications keep their own setup.
pub fn init_with_default(default_level: filter::LevelFilter) {
    let env_filter = filter::EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter);

    if registry().with(fmt_layer).try_init().is_err() {
        tracing::debug!(msg = "Global tracing subscriber already installed");
    }
}
