//! # Rocket-Envelope Telemetry
//!
//! Structured logging for every Rocket-Envelope crate.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rk_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RK_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `RK_JSON_LOGS` | `false` | JSON lines instead of pretty output |
//! | `RK_SERVICE_NAME` | `rocket-envelope` | Service name stamped on startup |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Convenience macro for creating a span with subsystem context.
///
/// # Example
///
/// ```rust,ignore
/// use rk_telemetry::subsystem_span;
///
/// let _span = subsystem_span!("build_envelope", subsystem = "rk-02", request_id = 42).entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        $crate::tracing::info_span!($name, $($field)*)
    };
}
