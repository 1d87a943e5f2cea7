//! Conformance test helpers for the vexpr expression evaluator.
//!
//! Provides shared functions that run expression text through the full
//! evaluation path (lex, evaluate, report) and return structured results
//! for assertion in the table-driven suites under `tests/`.

#![warn(missing_docs)]

use vexpr_config::load_config_from_str;
use vexpr_diagnostics::{Diagnostic, DiagnosticSink};
use vexpr_eval::{evaluate_with_sink, EvalOptions, INVALID_RESULT};
use vexpr_source::SourceDb;

/// A table row: test name, expression, expected result text, expected validity.
pub type Case<'a> = (&'a str, &'a str, &'a str, bool);

/// Result of evaluating one expression with diagnostics collected.
pub struct EvalOutcome {
    /// Canonical result text, `x` when invalid.
    pub result: String,
    /// Whether the expression evaluated.
    pub valid: bool,
    /// Diagnostics emitted while evaluating.
    pub diagnostics: Vec<Diagnostic>,
    /// The source database holding the expression, for span resolution.
    pub source_db: SourceDb,
}

impl EvalOutcome {
    /// The error diagnostics, at most one per expression.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }

    /// The warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.severity.is_error())
    }
}

/// Evaluates `expression` with the given options, collecting diagnostics.
pub fn run_with(expression: &str, options: EvalOptions) -> EvalOutcome {
    let mut source_db = SourceDb::new();
    let id = source_db.add_expr("conformance", expression);
    let sink = DiagnosticSink::new();
    let (result, valid) = match evaluate_with_sink(expression, id, options, &sink) {
        Some(eval) => (eval.text, true),
        None => (INVALID_RESULT.to_string(), false),
    };
    EvalOutcome {
        result,
        valid,
        diagnostics: sink.take_sorted(),
        source_db,
    }
}

/// Evaluates `expression` with default options.
pub fn run(expression: &str) -> EvalOutcome {
    run_with(expression, EvalOptions::default())
}

/// Builds evaluation options from `vexpr.toml` text.
pub fn options_from_toml(toml: &str) -> EvalOptions {
    let config = load_config_from_str(toml).expect("conformance config should be valid");
    EvalOptions::from(&config.eval)
}

/// Checks every row of a table against [`vexpr_eval::parse_expression`] and
/// panics with a list of all mismatching rows.
pub fn check_cases(cases: &[Case<'_>]) {
    let failures: Vec<String> = cases
        .iter()
        .filter_map(|&(name, expression, expected, valid)| {
            let actual = vexpr_eval::parse_expression(expression);
            if actual == (expected.to_string(), valid) {
                None
            } else {
                Some(format!(
                    "  {name}: {expression:?} gave ({:?}, {}), expected ({expected:?}, {valid})",
                    actual.0, actual.1
                ))
            }
        })
        .collect();
    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}

/// Checks that every row evaluates with exactly one error diagnostic when
/// invalid and none when valid. Warnings are not counted.
pub fn check_diagnostics(cases: &[Case<'_>]) {
    for &(name, expression, _, valid) in cases {
        let outcome = run(expression);
        assert_eq!(outcome.valid, valid, "{name}: validity");
        let errors = outcome.errors().count();
        assert_eq!(
            errors,
            usize::from(!valid),
            "{name}: diagnostics {:?}",
            outcome.diagnostics
        );
    }
}
