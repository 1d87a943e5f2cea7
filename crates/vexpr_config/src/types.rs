//! Configuration types deserialized from `vexpr.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `vexpr.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VexprConfig {
    /// Evaluator limits.
    #[serde(default)]
    pub eval: EvalConfig,
    /// CLI output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// The `[eval]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Bit width `~` uses when its operand carries no size prefix.
    pub default_width: u32,
    /// Maximum nesting of groups, arrays, calls and unary operators.
    pub max_depth: u32,
    /// Largest accepted shift amount, also the cap on `~` widths.
    pub max_shift: u32,
    /// Largest exponent accepted by `**` when the base magnitude exceeds one.
    pub max_exponent: u32,
    /// Largest integer or real mantissa, in bits, an operator may produce.
    pub max_result_bits: u32,
}

impl EvalConfig {
    /// Default `~` width.
    pub const DEFAULT_WIDTH: u32 = 32;
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: u32 = 256;
    /// Default shift limit.
    pub const DEFAULT_MAX_SHIFT: u32 = 4096;
    /// Default exponent limit.
    pub const DEFAULT_MAX_EXPONENT: u32 = 4096;
    /// Default result size limit, about 19,700 decimal digits.
    pub const DEFAULT_MAX_RESULT_BITS: u32 = 65536;
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            default_width: Self::DEFAULT_WIDTH,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_shift: Self::DEFAULT_MAX_SHIFT,
            max_exponent: Self::DEFAULT_MAX_EXPONENT,
            max_result_bits: Self::DEFAULT_MAX_RESULT_BITS,
        }
    }
}

/// The `[output]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// How the CLI prints results.
    pub format: OutputFormat,
}

/// Result rendering used by the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One plain-text line per expression (default).
    #[default]
    Text,
    /// One JSON object per expression.
    Json,
}
