//! Human-readable rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use vexpr_source::SourceDb;

const RESET: &str = "\x1b[0m";
const BLUE: &str = "\x1b[1;34m";

/// Formats diagnostics into printable strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// error[E103]: division by zero
///   --> <arg 1>:1:3
///   |
/// 1 | 8/(2-2)
///   |   ^^^^^ divisor is zero
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        let head = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(diag.severity.ansi(), &head),
            diag.message
        ));

        let span = diag.primary_span;
        let located = source_db.resolve_span(span).zip(source_db.get(span.expr));
        if let Some((resolved, expr)) = located {
            let line_num = resolved.line.to_string();
            let padding = " ".repeat(line_num.len());
            let gutter = self.paint(BLUE, "|");

            out.push_str(&format!("{padding}{} {resolved}\n", self.paint(BLUE, "-->")));
            out.push_str(&format!("{padding} {gutter}\n"));
            out.push_str(&format!(
                "{} {gutter} {}\n",
                self.paint(BLUE, &line_num),
                expr.line_text(span.start)
            ));

            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();
            out.push_str(&format!(
                "{padding} {gutter} {}\n",
                self.paint(
                    diag.severity.ansi(),
                    &format!("{}{primary_msg}", resolved.underline(LabelStyle::Primary.mark()))
                )
            ));

            // Secondary labels are drawn only when they share the primary line.
            let secondary = diag
                .labels
                .iter()
                .filter(|l| l.style == LabelStyle::Secondary && l.span.expr == span.expr)
                .filter_map(|l| Some((source_db.resolve_span(l.span)?, l)))
                .filter(|(at, _)| at.line == resolved.line);
            for (at, label) in secondary {
                out.push_str(&format!(
                    "{padding} {gutter} {}\n",
                    self.paint(
                        BLUE,
                        &format!("{} {}", at.underline(label.style.mark()), label.message)
                    )
                ));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
