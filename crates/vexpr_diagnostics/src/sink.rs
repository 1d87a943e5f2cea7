//! Thread-safe diagnostic accumulator for parallel evaluation.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Collects the diagnostics of every expression evaluated in one run.
///
/// `vexpr batch` evaluates lines on the rayon pool and all workers emit into
/// one sink, so diagnostics arrive in completion order. [`take_sorted`]
/// restores expression order for printing. Counts are atomic and never take
/// the lock.
///
/// [`take_sorted`]: DiagnosticSink::take_sorted
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
    warning_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
            warning_count: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A worker that panicked mid-push leaves a usable vector.
        self.diagnostics
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        let counter = match diag.severity {
            Severity::Error => &self.error_count,
            Severity::Warning => &self.warning_count,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.lock().push(diag);
    }

    /// Returns `true` if any invalid expression has been reported.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of errors emitted so far, one per invalid expression.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Number of warnings emitted so far.
    pub fn warning_count(&self) -> usize {
        self.warning_count.load(Ordering::Relaxed)
    }

    /// Takes all accumulated diagnostics in emission order, leaving the sink
    /// empty. Counts are kept.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// Like [`take_all`](Self::take_all), ordered by expression and then by
    /// position within the expression.
    pub fn take_sorted(&self) -> Vec<Diagnostic> {
        let mut diagnostics = self.take_all();
        diagnostics.sort_by_key(|d| (d.primary_span.expr, d.primary_span.start));
        diagnostics
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}
