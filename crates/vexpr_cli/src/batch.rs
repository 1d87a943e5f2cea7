//! `vexpr batch`: evaluates a file of expressions in parallel.
//!
//! Every non-blank line that does not start with `#` is one expression.
//! Lines are evaluated on the rayon thread pool and share one
//! [`DiagnosticSink`]; results are printed in file order.

use std::fs;
use std::path::Path;

use rayon::prelude::*;
use vexpr_diagnostics::DiagnosticSink;
use vexpr_eval::{evaluate_with_sink, EvalOptions};
use vexpr_source::{ExprId, SourceDb};

use crate::error::CliError;
use crate::report::{exit_code, print_diagnostics, render_rows, ResultRow};
use crate::settings::Settings;
use crate::{GlobalArgs, ReportFormat};

/// Runs the `vexpr batch` command.
///
/// Returns exit code 0 if every expression is valid, 1 otherwise.
pub fn run(file: &Path, global: &GlobalArgs) -> Result<i32, CliError> {
    let settings = Settings::resolve(global)?;
    let content = fs::read_to_string(file).map_err(|source| CliError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let name = file.display().to_string();

    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();
    let rows = evaluate_lines(&content, &name, settings.options, &mut source_db, &sink);

    print_diagnostics(&sink.take_sorted(), &source_db, global.color);

    if !rows.is_empty() {
        println!("{}", render_rows(&rows, settings.format, Some(&name))?);
    }

    if !global.quiet && settings.format == ReportFormat::Text {
        let invalid = rows.iter().filter(|row| !row.valid).count();
        eprintln!(
            "   Result: {} expression(s), {} valid, {invalid} invalid, {} warning(s)",
            rows.len(),
            rows.len() - invalid,
            sink.warning_count()
        );
    }
    Ok(exit_code(&rows))
}

/// Evaluates the expression lines of `content`, registering each one in
/// `source_db` as `name:line`.
fn evaluate_lines(
    content: &str,
    name: &str,
    options: EvalOptions,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Vec<ResultRow> {
    let entries: Vec<(usize, ExprId, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, text)| {
            let trimmed = text.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(index, text)| {
            let line = index + 1;
            let id = source_db.add_expr(format!("{name}:{line}"), text);
            (line, id, text)
        })
        .collect();

    entries
        .par_iter()
        .map(|&(line, id, text)| {
            ResultRow::new(text, evaluate_with_sink(text, id, options, sink)).at_line(line)
        })
        .collect()
}
