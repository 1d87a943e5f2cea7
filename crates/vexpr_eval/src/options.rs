//! Evaluation limits.

use serde::{Deserialize, Serialize};
use vexpr_config::EvalConfig;

/// Tunable limits for one evaluation.
///
/// Every limit fails closed: exceeding it makes the expression invalid
/// rather than consuming unbounded stack or memory.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct EvalOptions {
    /// Bit width `~` uses when its operand is not a sized literal.
    pub default_width: u32,
    /// Maximum nesting of groups, arrays, calls and unary operators.
    pub max_depth: u32,
    /// Largest accepted shift amount and `~` width.
    pub max_shift: u32,
    /// Largest exponent accepted by `**` when the result would grow.
    pub max_exponent: u32,
    /// Largest integer, or real mantissa, an operator may produce, in bits.
    pub max_result_bits: u32,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self::from(&EvalConfig::default())
    }
}

impl From<&EvalConfig> for EvalOptions {
    fn from(config: &EvalConfig) -> Self {
        Self {
            default_width: config.default_width,
            max_depth: config.max_depth,
            max_shift: config.max_shift,
            max_exponent: config.max_exponent,
            max_result_bits: config.max_result_bits,
        }
    }
}
