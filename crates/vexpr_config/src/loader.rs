//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{EvalConfig, VexprConfig};
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "vexpr.toml";

/// Loads and validates `vexpr.toml` from a directory.
pub fn load_config(dir: &Path) -> Result<VexprConfig, ConfigError> {
    let content = std::fs::read_to_string(dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<VexprConfig, ConfigError> {
    let config: VexprConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads an explicit configuration file, or falls back to defaults.
///
/// With `Some(path)` the file must exist. With `None`, `./vexpr.toml` is used
/// when present and the built-in defaults otherwise.
pub fn load_config_or_default(path: Option<&Path>) -> Result<VexprConfig, ConfigError> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            load_config_from_str(&content)
        }
        None => {
            let local = Path::new(CONFIG_FILE_NAME);
            if local.is_file() {
                load_config(Path::new("."))
            } else {
                Ok(VexprConfig::default())
            }
        }
    }
}

fn validate_config(config: &VexprConfig) -> Result<(), ConfigError> {
    let eval = &config.eval;
    if eval.max_depth == 0 {
        return Err(ConfigError::ValidationError(
            "eval.max_depth must be at least 1".to_string(),
        ));
    }
    if eval.max_shift == 0 {
        return Err(ConfigError::ValidationError(
            "eval.max_shift must be at least 1".to_string(),
        ));
    }
    if eval.default_width == 0 || eval.default_width > eval.max_shift {
        return Err(ConfigError::ValidationError(format!(
            "eval.default_width must be in 1..={} (got {})",
            eval.max_shift, eval.default_width
        )));
    }
    if eval.max_exponent > EvalConfig::DEFAULT_MAX_EXPONENT * 16 {
        return Err(ConfigError::ValidationError(format!(
            "eval.max_exponent must not exceed {}",
            EvalConfig::DEFAULT_MAX_EXPONENT * 16
        )));
    }
    if eval.max_result_bits < eval.max_shift {
        return Err(ConfigError::ValidationError(format!(
            "eval.max_result_bits must be at least eval.max_shift ({})",
            eval.max_shift
        )));
    }
    Ok(())
}
