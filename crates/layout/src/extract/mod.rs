//! Reverse-engineer a rendered container's line structure into [`TextRun`]s.
//!
//! The host lays the text out; this module only reads the resulting geometry.
//! Each call is a pure function of the host's current layout: nothing is
//! cached between calls, and a new [`Layout`] is built every time.

mod character;
mod run;


use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::host::LayoutHost;
use crate::options::{ExtractOptions, Granularity};
use crate::types::{Layout, TextRun};
use core_types::Point;

/// Everything the per-mode passes need about one text span.
pub(crate) struct SpanContext<'t, N> {
    pub(crate) index: usize,
    pub(crate) text_node: N,
    pub(crate) text: &'t str,
    pub(crate) font: Option<&'t str>,
    /// Viewport position of the container; subtracted from every emitted box.
    pub(crate) origin: Point,
}

/// Extract the positioned text runs of `container`.
///
/// Never fails. Spans without text and line boxes whose caret probes are
/// ambiguous are skipped and reported to `sink`; the worst case is a layout
/// with no runs.
pub fn extract_layout<H, S>(
    host: &H,
    container: H::Node,
    options: ExtractOptions,
    mut sink: S,
) -> Layout
where
    H: LayoutHost + ?Sized,
    S: DiagnosticSink,
{
    let origin = host.bounding_client_rect(container).origin();
    let spans = host.text_spans(container);

    if options.granularity == Granularity::Run
        && !spans.is_empty()
        && !host.caret_support().is_supported()
    {
        sink.report(Diagnostic::CaretUnsupported);
    }

    let mut lines: Vec<TextRun> = Vec::new();
    for (index, span) in spans.into_iter().enumerate() {
        let Some(text_node) = host.first_child(span) else {
            sink.report(Diagnostic::MissingText { span: index });
            continue;
        };
        let text = match host.text_content(text_node) {
            Some(text) if !text.is_empty() => text,
            _ => {
                sink.report(Diagnostic::MissingText { span: index });
                continue;
            }
        };
        let font = host.computed_font(span).filter(|f| !f.is_empty());

        let ctx = SpanContext {
            index,
            text_node,
            text: &text,
            font: font.as_deref(),
            origin,
        };
        match options.granularity {
            Granularity::Character => {
                character::extract_span(host, &ctx, options.sub_rect, &mut lines)
            }
            Granularity::Run => run::extract_span(host, span, &ctx, &mut sink, &mut lines),
        }
    }

    let size = host.offset_size(container);
    let layout = Layout::new(size.width, size.height, lines);
    if log::log_enabled!(target: "layout.extract", log::Level::Trace) {
        match serde_json::to_string(&layout) {
            Ok(json) => log::trace!(target: "layout.extract", "{json}"),
            Err(err) => log::trace!(target: "layout.extract", "layout not serializable: {err}"),
        }
    }
    layout
}

/// Boolean-switch entry point with diagnostics routed to the `log` facade.
pub fn compute_layout<H>(host: &H, container: H::Node, character_level: bool) -> Layout
where
    H: LayoutHost + ?Sized,
{
    extract_layout(host, container, ExtractOptions::from(character_level), LogSink)
}
