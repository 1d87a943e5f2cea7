//! Result rows and their text and JSON rendering.

use serde::Serialize;
use vexpr_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};
use vexpr_eval::{base_for_expression, is_plain_value, Evaluation, INVALID_RESULT};
use vexpr_source::SourceDb;

use crate::error::CliError;
use crate::ReportFormat;

/// One evaluated expression as printed by the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Line number in a batch file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// The expression text.
    pub expression: String,
    /// Canonical result, or `x` when invalid.
    pub result: String,
    /// Whether the expression evaluated.
    pub valid: bool,
    /// Greatest literal radix.
    pub base: u32,
    /// Whether the expression is a single literal.
    pub plain: bool,
}

impl ResultRow {
    /// Builds a row from the outcome of `evaluate_with_sink`.
    pub fn new(expression: &str, evaluation: Option<Evaluation>) -> Self {
        match evaluation {
            Some(eval) => Self {
                line: None,
                expression: expression.to_string(),
                result: eval.text,
                valid: true,
                base: eval.base,
                plain: eval.plain,
            },
            None => Self {
                line: None,
                expression: expression.to_string(),
                result: INVALID_RESULT.to_string(),
                valid: false,
                base: base_for_expression(expression),
                plain: is_plain_value(expression),
            },
        }
    }

    /// Attaches a batch-file line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Renders rows in the requested format.
///
/// Text output is one result per line, prefixed by `name:line: ` for batch
/// rows. JSON output is a single array.
pub fn render_rows(
    rows: &[ResultRow],
    format: ReportFormat,
    name: Option<&str>,
) -> Result<String, CliError> {
    match format {
        ReportFormat::Text => Ok(rows
            .iter()
            .map(|row| match (name, row.line) {
                (Some(name), Some(line)) => format!("{name}:{line}: {}", row.result),
                _ => row.result.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Prints diagnostics to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic], source_db: &SourceDb, color: bool) {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag, source_db));
    }
}

/// Returns the process exit code for a set of rows: 1 if any is invalid.
pub fn exit_code(rows: &[ResultRow]) -> i32 {
    if rows.iter().all(|row| row.valid) {
        0
    } else {
        1
    }
}
