//! Logging setup
//!
//! Logs go to stderr; stdout is reserved for the workload outcome.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "smallfile=info";

/// Initialize tracing from `RUST_LOG` and `SMALLFILE_LOG_FORMAT` (`json` | `pretty`)
pub fn init_logging() -> Result<()> {
    let log_format =
        std::env::var("SMALLFILE_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
        }
    }
    .context("Failed to install tracing subscriber")
}
