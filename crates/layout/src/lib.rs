//! Text-run extraction from rendered rich text.
//!
//! A host (a browser binding, or the simulated renderer in `sim_host`) lays
//! styled text spans out inside a container. [`extract_layout`] reads that
//! geometry back through [`LayoutHost`] and produces a [`Layout`]: the text of
//! each visual row with its container-relative box and computed font, ready to
//! be redrawn elsewhere.

mod caret;
mod diagnostics;
mod extract;
mod host;
mod options;
mod types;

pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, Probe};
pub use extract::{compute_layout, extract_layout};
pub use host::{CaretPosition, CaretRange, CaretSupport, LayoutHost, TEXT_SPAN_SELECTOR};
pub use options::{CARET_PROBE_INSET, ExtractOptions, Granularity, SubRectPolicy};
pub use types::{Layout, TextRun};
