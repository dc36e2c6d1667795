//! Recoverable anomalies seen during extraction.
//!
//! Extraction never fails; anything it has to skip is reported to a
//! [`DiagnosticSink`] instead. [`LogSink`] forwards to the `log` facade, and a
//! `Vec<Diagnostic>` collects reports so tests can count them.

use std::fmt;

/// Which edge of a line box a run-mode caret probe was aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Probe {
    Start,
    End,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Probe::Start => "start",
            Probe::End => "end",
        })
    }
}

/// `span` is the index into the container's text spans; `rect` the index
/// into that span's client rects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A marked span has no text node, or its text is empty. The span is
    /// skipped.
    MissingText { span: usize },
    /// Run mode on a host with no caret primitive. Reported once per
    /// extraction; every line box will then also be unresolved.
    CaretUnsupported,
    /// A caret probe found no text position. The line box is discarded.
    CaretUnresolved { span: usize, rect: usize, probe: Probe },
    /// A caret probe landed in another text node. The line box is discarded.
    CaretMismatch { span: usize, rect: usize, probe: Probe },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingText { span } => {
                write!(f, "text span {span} has no text node content; skipped")
            }
            Diagnostic::CaretUnsupported => {
                f.write_str("host has no caret-from-point primitive; run extraction will be empty")
            }
            Diagnostic::CaretUnresolved { span, rect, probe } => write!(
                f,
                "span {span} rect {rect}: {probe} caret did not resolve; rect discarded"
            ),
            Diagnostic::CaretMismatch { span, rect, probe } => write!(
                f,
                "span {span} rect {rect}: {probe} caret landed in another text node; rect discarded"
            ),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `log::warn!` under the `layout.extract` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!(target: "layout.extract", "{diagnostic}");
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
