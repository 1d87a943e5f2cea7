//! `vexpr eval`, `vexpr base` and `vexpr plain`.

use vexpr_diagnostics::DiagnosticSink;
use vexpr_eval::{base_for_expression, evaluate_with_sink, is_plain_value, EvalOptions};
use vexpr_source::SourceDb;

use crate::error::CliError;
use crate::report::{exit_code, print_diagnostics, render_rows, ResultRow};
use crate::settings::Settings;
use crate::{GlobalArgs, ReportFormat};

/// Runs the `vexpr eval` command.
///
/// Prints one result per expression and renders a diagnostic for each
/// invalid one. Returns exit code 0 if all are valid, 1 otherwise.
pub fn run(expressions: &[String], global: &GlobalArgs) -> Result<i32, CliError> {
    let settings = Settings::resolve(global)?;
    let mut source_db = SourceDb::new();
    let sink = DiagnosticSink::new();

    let rows = evaluate_all(expressions, settings.options, &mut source_db, &sink);

    print_diagnostics(&sink.take_sorted(), &source_db, global.color);
    println!("{}", render_rows(&rows, settings.format, None)?);

    let invalid = rows.iter().filter(|row| !row.valid).count();
    if !global.quiet && invalid > 0 && settings.format == ReportFormat::Text {
        eprintln!("   Result: {} valid, {invalid} invalid", rows.len() - invalid);
    }
    Ok(exit_code(&rows))
}

/// Evaluates each expression as its own entry in `source_db`, named
/// `<arg N>` so diagnostics can point at it.
fn evaluate_all(
    expressions: &[String],
    options: EvalOptions,
    source_db: &mut SourceDb,
    sink: &DiagnosticSink,
) -> Vec<ResultRow> {
    expressions
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let id = source_db.add_expr(format!("<arg {}>", i + 1), text.as_str());
            ResultRow::new(text, evaluate_with_sink(text, id, options, sink))
        })
        .collect()
}

/// Runs the `vexpr base` command.
pub fn run_base(expression: &str, global: &GlobalArgs) -> Result<i32, CliError> {
    let settings = Settings::resolve(global)?;
    let base = base_for_expression(expression);
    match settings.format {
        ReportFormat::Text => println!("{base}"),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "expression": expression,
                "base": base,
            }))?
        ),
    }
    Ok(0)
}

/// Runs the `vexpr plain` command.
pub fn run_plain(expression: &str, global: &GlobalArgs) -> Result<i32, CliError> {
    let settings = Settings::resolve(global)?;
    let plain = is_plain_value(expression);
    match settings.format {
        ReportFormat::Text => println!("{plain}"),
        ReportFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "expression": expression,
                "plain": plain,
            }))?
        ),
    }
    Ok(0)
}
