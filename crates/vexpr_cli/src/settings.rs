//! Effective settings for one command: `vexpr.toml` merged with CLI flags.

use std::path::Path;

use vexpr_config::OutputFormat;
use vexpr_eval::EvalOptions;

use crate::error::CliError;
use crate::{GlobalArgs, ReportFormat};

/// Evaluation options and output format after applying every source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Limits passed to the evaluator.
    pub options: EvalOptions,
    /// How results are printed.
    pub format: ReportFormat,
}

impl Settings {
    /// Loads the configuration named by `--config` (or `./vexpr.toml`, or the
    /// defaults) and lets `--format` override the configured output format.
    pub fn resolve(global: &GlobalArgs) -> Result<Settings, CliError> {
        let config = vexpr_config::load_config_or_default(global.config.as_deref().map(Path::new))?;
        let configured = match config.output.format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        };
        Ok(Settings {
            options: EvalOptions::from(&config.eval),
            format: global.format.unwrap_or(configured),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn global(config: Option<&Path>, format: Option<ReportFormat>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            color: false,
            config: config.map(|p| p.display().to_string()),
            format,
        }
    }

    #[test]
    fn config_file_sets_options_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vexpr.toml");
        fs::write(&path, "[eval]\ndefault_width = 8\n\n[output]\nformat = \"json\"\n").unwrap();

        let settings = Settings::resolve(&global(Some(&path), None)).unwrap();
        assert_eq!(settings.options.default_width, 8);
        assert_eq!(settings.options.max_depth, 256);
        assert_eq!(settings.format, ReportFormat::Json);
    }

    #[test]
    fn flag_overrides_configured_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vexpr.toml");
        fs::write(&path, "[output]\nformat = \"json\"\n").unwrap();

        let settings = Settings::resolve(&global(Some(&path), Some(ReportFormat::Text))).unwrap();
        assert_eq!(settings.format, ReportFormat::Text);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(
            Settings::resolve(&global(Some(&path), None)),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vexpr.toml");
        fs::write(&path, "[eval]\nmax_depth = 0\n").unwrap();
        assert!(Settings::resolve(&global(Some(&path), None)).is_err());
    }
}
