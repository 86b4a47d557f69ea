//! Configuration system for gridtrace.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod gridtrace_config;
pub mod logging_config;
pub mod traversal_config;

pub use gridtrace_config::{ConfigOverrides, GridtraceConfig};
pub use logging_config::LoggingConfig;
pub use traversal_config::{QueueDiscipline, TraversalSettings};
