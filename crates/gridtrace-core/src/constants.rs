//! Shared constants for gridtrace.

/// gridtrace version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the `EnvFilter` directives.
pub const LOG_ENV_VAR: &str = "GRIDTRACE_LOG";

/// Log filter used when `GRIDTRACE_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "gridtrace=info";

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "gridtrace.toml";

/// User config directory, relative to the home directory.
pub const USER_CONFIG_DIR: &str = ".gridtrace";

/// Whether a traversal may stop on its start item when no config says otherwise.
pub const DEFAULT_CAN_STOP_ON_START_ITEM: bool = true;

/// Weight assigned to a branch with no start item. Negative weights are
/// rejected by weighted queues, so such a branch is never dequeued.
pub const ABSENT_BRANCH_WEIGHT: i32 = -1;

// ---- Context value keys for the built-in network conditions ----

/// Context key for the global equipment step counter.
pub const EQUIPMENT_STEP_COUNT_KEY: &str = "gridtrace:equipment_step_count";

/// Prefix for per-equipment-type step counters; the type name is appended.
pub const EQUIPMENT_TYPE_STEP_COUNT_PREFIX: &str = "gridtrace:equipment_type_step_count:";
