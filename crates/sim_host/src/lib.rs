//! A deterministic stand-in for a browser's text layout.
//!
//! [`SimHost`] parses a [`Scene`] (markup, stylesheet, container geometry),
//! lays the container's inline content out with a [`TextMeasurer`], and
//! answers the geometry and caret queries of [`layout::LayoutHost`]. Used by
//! tests, benchmarks, and the `spanlayout` dump tool in place of a live
//! document.

mod flow;
mod host;
mod measure;
mod scene;

pub use host::SimHost;
pub use measure::{MonoMeasurer, TextMeasurer};
pub use scene::{CaretConfig, Scene, SceneError};
