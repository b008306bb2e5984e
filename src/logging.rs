// SPDX-License-Identifier: MIT
//
// Diagnostics go to a file, never to the terminal: stdout is the screen and
// anything printed there would corrupt the frame. Without `--log` no
// subscriber is installed and every `tracing` call is a no-op.
//
// Filtering follows RUST_LOG, defaulting to `info`.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info";

/// Create (truncate) `path` and install it as the global log sink.
///
/// # Errors
///
/// Fails if the file cannot be created or a global subscriber is already set.
pub fn init(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    build_subscriber(file)
        .try_init()
        .map_err(io::Error::other)
}

/// A subscriber writing plain-text lines to `file`.
fn build_subscriber(file: File) -> impl tracing::Subscriber + Send + Sync {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer().with_writer(Arc::new(file)).with_ansi(false);

    tracing_subscriber::registry().with(fmt_layer).with(filter)
}
