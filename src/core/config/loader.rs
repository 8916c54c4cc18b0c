#![allow(clippy::result_large_err)]

use super::MandateConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "mandate.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from workspace root (workspace/mandate.toml)
    /// Environment variables override config file values
    pub fn load_from_workspace(workspace_path: &Path) -> Result<MandateConfig, AppError> {
        Self::load(&workspace_path.join(CONFIG_FILE_NAME))
    }

    /// Load config from an explicit path, falling back to defaults when the
    /// file does not exist, then apply env overrides and validate.
    pub fn load(path: &Path) -> Result<MandateConfig, AppError> {
        let mut config = Self::load_from_file(path)?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Self::validate_config(&config)?;
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<MandateConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: MandateConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
            .with_code("MDT-CONFIG-001")
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    /// Environment variables take precedence over config file values
    fn apply_env_overrides(config: &mut MandateConfig) {
        if let Ok(tag_field) = env::var("MANDATE_TAG_FIELD") {
            config.router.tag_field = tag_field;
        }

        if let Ok(continue_str) = env::var("MANDATE_CONTINUE_ON_ERROR") {
            if let Ok(continue_on_error) = continue_str.parse::<bool>() {
                config.worker.continue_on_error = continue_on_error;
            }
        }

        if let Ok(output_dir) = env::var("MANDATE_OUTPUT_DIR") {
            config.worker.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(rejected_dir) = env::var("MANDATE_REJECTED_DIR") {
            config.worker.rejected_dir = Some(PathBuf::from(rejected_dir));
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "MANDATE_TAG_FIELD - Override the payload field used for routing (default: correspondence)",
            "MANDATE_CONTINUE_ON_ERROR - Keep processing after a rejected message (true/false, default: true)",
            "MANDATE_OUTPUT_DIR - Override the directory for transformed messages (default: transformed)",
            "MANDATE_REJECTED_DIR - Directory receiving rejected messages and their error reports",
            "MANDATE_LOG_LEVEL - Override the default tracing level (default: info)",
        ]
    }

    /// Validate configuration values
    pub fn validate_config(config: &MandateConfig) -> Result<(), AppError> {
        if config.router.tag_field.trim().is_empty() {
            return Err(invalid("router.tag_field cannot be empty"));
        }

        if config.worker.output_dir.as_os_str().is_empty() {
            return Err(invalid("worker.output_dir cannot be empty"));
        }

        let mut seen = HashSet::new();
        for transformer in &config.transformers {
            if transformer.name.trim().is_empty() {
                return Err(invalid("transformer name cannot be empty"));
            }
            if transformer.tag.trim().is_empty() {
                return Err(invalid(format!(
                    "transformer '{}' must declare a tag",
                    transformer.name
                )));
            }
            if let Some(parent) = &transformer.inherits {
                if !seen.contains(parent.as_str()) {
                    return Err(invalid(format!(
                        "transformer '{}' inherits from '{}', which is not declared before it",
                        transformer.name, parent
                    )));
                }
            }
            if !seen.insert(transformer.name.as_str()) {
                return Err(invalid(format!(
                    "transformer '{}' is declared more than once",
                    transformer.name
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::new(ErrorCategory::ConfigError, message).with_code("MDT-CONFIG-002")
}
