use core_types::Rect;
use serde::{Deserialize, Serialize};

/// One contiguous run of text on a single visual row, in container-relative
/// coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    /// Computed `font` shorthand of the originating span. `None` means the
    /// consumer should fall back to its own default font.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl TextRun {
    pub(crate) fn from_rect(text: impl Into<String>, rect: Rect, font: Option<&str>) -> Self {
        Self {
            text: text.into(),
            left: rect.left,
            top: rect.top,
            right: rect.right,
            bottom: rect.bottom,
            font: font.map(str::to_owned),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right, self.bottom)
    }

    /// Same visual row: identical top and bottom edges.
    #[allow(clippy::float_cmp)]
    pub(crate) fn shares_row(&self, rect: &Rect) -> bool {
        self.top == rect.top && self.bottom == rect.bottom
    }

    pub(crate) fn extend_to(&mut self, right: f32, text: &str) {
        self.right = right;
        self.text.push_str(text);
    }
}

/// Extraction result for one container.
///
/// Built once per extraction and never mutated afterwards; a later extraction
/// always produces a fresh value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    width: f32,
    height: f32,
    lines: Vec<TextRun>,
}

impl Layout {
    pub(crate) fn new(width: f32, height: f32, lines: Vec<TextRun>) -> Self {
        Self {
            width,
            height,
            lines,
        }
    }

    /// Container `offsetWidth`.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Container `offsetHeight`.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Runs in discovery order: span by span in document order, and within a
    /// span in text order.
    pub fn lines(&self) -> &[TextRun] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<TextRun> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_absent_font() {
        let layout = Layout::new(
            100.0,
            20.0,
            vec![
                TextRun::from_rect("Hi", Rect::new(0.0, 0.0, 20.0, 20.0), None),
                TextRun::from_rect("there", Rect::new(30.0, 0.0, 80.0, 20.0), Some("16px serif")),
            ],
        );
        let json = serde_json::to_value(&layout).expect("serializable");
        assert_eq!(json["width"], 100.0);
        assert!(json["lines"][0].get("font").is_none());
        assert_eq!(json["lines"][1]["font"], "16px serif");

        let back: Layout = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, layout);
    }

    #[test]
    fn extend_grows_right_edge_and_text() {
        let mut run = TextRun::from_rect("a", Rect::new(0.0, 0.0, 10.0, 20.0), None);
        assert!(run.shares_row(&Rect::new(10.0, 0.0, 20.0, 20.0)));
        assert!(!run.shares_row(&Rect::new(10.0, 0.0, 20.0, 21.0)));
        run.extend_to(20.0, "b");
        assert_eq!(run.text, "ab");
        assert_eq!(run.rect(), Rect::new(0.0, 0.0, 20.0, 20.0));
    }
}
