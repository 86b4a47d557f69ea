//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the gridtrace tracing/logging system.
///
/// Reads the `GRIDTRACE_LOG` environment variable for per-module log levels.
/// Format: `GRIDTRACE_LOG=gridtrace_traversal=debug,gridtrace_network=info`
///
/// Falls back to `gridtrace=info` if `GRIDTRACE_LOG` is not set or is invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_FILTER);
}

/// Same as [`init_tracing`] but with a caller-chosen fallback directive,
/// typically `GridtraceConfig::logging.filter`.
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
