//! Top-level gridtrace configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, QueueDiscipline, TraversalSettings};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`GRIDTRACE_*`)
/// 3. Project config (`gridtrace.toml` in the project root)
/// 4. User config (`~/.gridtrace/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GridtraceConfig {
    pub traversal: TraversalSettings,
    pub logging: LoggingConfig,
}

/// Explicit overrides, typically populated from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub queue: Option<QueueDiscipline>,
    pub can_stop_on_start_item: Option<bool>,
    pub max_equipment_steps: Option<u32>,
    pub log_filter: Option<String>,
}

impl GridtraceConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "Ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        config.validate()?;
        tracing::debug!(
            queue = %config.traversal.effective_queue(),
            can_stop_on_start_item = config.traversal.effective_can_stop_on_start_item(),
            "Loaded gridtrace config"
        );

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.traversal.max_equipment_steps == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "traversal.max_equipment_steps".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(filter) = &self.logging.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "logging.filter".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the user config path: `~/.gridtrace/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut Self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        config.merge(&file_config);
        Ok(())
    }

    /// Merge `other` into `self`; only `Some` values in `other` win.
    fn merge(&mut self, other: &Self) {
        if other.traversal.queue.is_some() {
            self.traversal.queue = other.traversal.queue;
        }
        if other.traversal.can_stop_on_start_item.is_some() {
            self.traversal.can_stop_on_start_item = other.traversal.can_stop_on_start_item;
        }
        if other.traversal.max_equipment_steps.is_some() {
            self.traversal.max_equipment_steps = other.traversal.max_equipment_steps;
        }
        if other.logging.filter.is_some() {
            self.logging.filter = other.logging.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `GRIDTRACE_TRAVERSAL_QUEUE`, `GRIDTRACE_LOG_FILTER`, etc.
    fn apply_env_overrides(config: &mut Self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("GRIDTRACE_TRAVERSAL_QUEUE") {
            config.traversal.queue = Some(val.parse()?);
        }
        if let Ok(val) = std::env::var("GRIDTRACE_TRAVERSAL_CAN_STOP_ON_START_ITEM") {
            if let Ok(v) = val.parse::<bool>() {
                config.traversal.can_stop_on_start_item = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GRIDTRACE_TRAVERSAL_MAX_EQUIPMENT_STEPS") {
            if let Ok(v) = val.parse::<u32>() {
                config.traversal.max_equipment_steps = Some(v);
            }
        }
        if let Ok(val) = std::env::var("GRIDTRACE_LOG_FILTER") {
            config.logging.filter = Some(val);
        }
        Ok(())
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut Self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.queue {
            config.traversal.queue = Some(v);
        }
        if let Some(v) = overrides.can_stop_on_start_item {
            config.traversal.can_stop_on_start_item = Some(v);
        }
        if let Some(v) = overrides.max_equipment_steps {
            config.traversal.max_equipment_steps = Some(v);
        }
        if let Some(ref v) = overrides.log_filter {
            config.logging.filter = Some(v.clone());
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
