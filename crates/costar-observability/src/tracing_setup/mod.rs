//! Tracing setup: subscriber initialization and span definitions.

pub mod spans;

use std::sync::Once;

use costar_core::config::ObservabilityConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding per-target log directives.
pub const LOG_ENV: &str = "COSTAR_LOG";

const DEFAULT_FILTER: &str = "costar=info";

static INIT: Once = Once::new();

/// Initialize human-readable logging to stderr.
///
/// Reads `COSTAR_LOG` (e.g. `COSTAR_LOG=costar_search=debug,costar_catalog=warn`),
/// falling back to `costar=info`. Idempotent.
pub fn init_tracing() {
    install(None, false);
}

/// Initialize JSON logging. Idempotent; the first initializer wins.
pub fn init_tracing_json() {
    install(None, true);
}

/// Initialize with an explicit filter, ignoring `COSTAR_LOG`.
pub fn init_tracing_with_filter(filter: &str) {
    install(Some(filter), false);
}

/// Initialize from config: `COSTAR_LOG` still wins over `log_filter`.
pub fn init_from_config(config: &ObservabilityConfig) {
    let fallback = config.effective_log_filter();
    let directive = std::env::var(LOG_ENV).unwrap_or(fallback);
    install(Some(&directive), config.effective_json());
}

fn install(filter: Option<&str>, json: bool) {
    INIT.call_once(|| {
        let filter = match filter {
            Some(directive) => {
                EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
            }
            None => EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        };

        let registry = tracing_subscriber::registry().with(filter);
        // A subscriber may already be installed by the embedding application.
        let _ = if json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()
        };
    });
}
