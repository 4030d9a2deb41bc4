//! watchbridge-decode
//!
//! Reads one attachment batch (concatenated `[tag][length][payload]` frames)
//! from stdin and prints every decoded attachment as a JSON line on stdout.
//! - Config: `$WATCHBRIDGE_CONFIG` (default `watchbridge.yaml`, optional)
//! - Logs go to stderr, filtered by `RUST_LOG`

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use bytes::Bytes;
use tracing_subscriber::{fmt, EnvFilter};

use watchbridge_companion::consumers::JsonLinesConsumer;
use watchbridge_companion::{config, Receiver, Result};

const DEFAULT_CONFIG_PATH: &str = "watchbridge.yaml";

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "decode failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let path = std::env::var("WATCHBRIDGE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let cfg = config::load_or_default(&path)?;

    let receiver = Receiver::new(cfg)?;
    receiver.register_consumer(Arc::new(JsonLinesConsumer::new(std::io::stdout())));

    let mut raw = Vec::new();
    std::io::stdin().lock().read_to_end(&mut raw)?;
    tracing::info!(bytes = raw.len(), "batch read from stdin");

    let report = receiver.receive(Bytes::from(raw))?;
    tracing::info!(
        delivered = report.delivered,
        skipped = report.skipped.len(),
        "batch decoded"
    );
    tracing::debug!(metrics = %receiver.metrics().render(), "metrics snapshot");
    Ok(())
}
