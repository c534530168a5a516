//! # Rocket-Envelope Client
//!
//! Builds the envelopes of one session and prints them as hex wire bytes,
//! one per line.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RK_LOG_LEVEL`, `RK_JSON_LOGS`)
//! 2. Load configuration from `RK_*` variables
//! 3. Wire settings, tracker, collaborators and builder
//! 4. Without `RK_AUTH_TICKET`: print the handshake envelope
//! 5. With it: print one signed envelope around the startup requests

use anyhow::{Context, Result};
use client_runtime::runtime::startup_requests;
use client_runtime::{ClientRuntime, RuntimeConfig};
use rk_telemetry::{init_logging, TelemetryConfig};
use tracing::info;

fn main() -> Result<()> {
    init_logging(&TelemetryConfig::from_env()).context("Failed to initialize logging")?;

    let config = RuntimeConfig::from_env().context("Failed to load configuration")?;
    let runtime = ClientRuntime::new(&config).context("Failed to assemble client session")?;

    let requests = startup_requests();
    let envelope = runtime
        .next_envelope(&requests)
        .context("Failed to build envelope")?;
    let bytes = runtime.encode(&envelope).context("Failed to encode envelope")?;

    info!(
        request_id = envelope.request_id,
        signed = runtime.is_authenticated(),
        bytes = bytes.len(),
        "Envelope ready"
    );
    println!("{}", hex::encode(bytes));

    Ok(())
}
