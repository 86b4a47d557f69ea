//! Logging configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LOG_FILTER;

/// Configuration for log output.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `GRIDTRACE_LOG` is unset. Default: `gridtrace=info`.
    pub filter: Option<String>,
}

impl LoggingConfig {
    /// Returns the effective filter directive.
    pub fn effective_filter(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
