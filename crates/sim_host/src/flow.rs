//! Inline formatting for the simulated renderer.
//!
//! Text is laid out with `white-space: pre-wrap` rules: every space is kept,
//! lines break after spaces, spaces that overflow hang at the line end with
//! their boxes clamped to it, and a word wider than the whole line is broken
//! between characters. Every code point becomes one [`Glyph`].

use crate::measure::TextMeasurer;
use css::{ComputedStyle, Display, Stylesheet, TextAlign, compute_style_for};
use html::{Id, Node};
use std::ops::Range;
use tools::utf16::code_points;
use tools::whitespace::is_ascii_break_space;

/// One code point's box, in content-box coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Glyph {
    /// Text node the code point belongs to.
    pub(crate) node: Id,
    /// UTF-16 range within that node.
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) line: usize,
    pub(crate) left: f32,
    pub(crate) right: f32,
    pub(crate) top: f32,
    pub(crate) bottom: f32,
    pub(crate) kind: GlyphKind,
    line_height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GlyphKind {
    Visible,
    Space,
    Newline,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Line {
    pub(crate) top: f32,
    pub(crate) bottom: f32,
    pub(crate) glyphs: Range<usize>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Flow {
    pub(crate) lines: Vec<Line>,
    pub(crate) glyphs: Vec<Glyph>,
    pub(crate) height: f32,
}

impl Flow {
    pub(crate) fn line_glyphs(&self, line: &Line) -> &[Glyph] {
        &self.glyphs[line.glyphs.clone()]
    }
}

enum Item {
    Char {
        node: Id,
        start: usize,
        end: usize,
        kind: GlyphKind,
        advance: f32,
        line_height: f32,
    },
    /// Edge of a block box: ends a non-empty line.
    BlockEdge,
    /// `<br>`: always ends the line, even an empty one.
    ForcedBreak,
}

/// Lay out the inline content of `container` within `width` px.
pub(crate) fn layout_container(
    document: &Node,
    container: &Node,
    sheet: &Stylesheet,
    measurer: &dyn TextMeasurer,
    width: f32,
) -> Flow {
    let container_style =
        compute_style_for(document, container.id(), sheet).unwrap_or_else(ComputedStyle::initial);
    let mut items = Vec::new();
    for child in container.children() {
        collect_items(document, child, sheet, measurer, &mut items);
    }

    let mut breaker = LineBreaker::new(width, measurer.line_height(&container_style));
    let mut i = 0;
    while i < items.len() {
        match &items[i] {
            Item::Char {
                kind: GlyphKind::Visible,
                ..
            } => {
                let word_end = items[i..]
                    .iter()
                    .position(|it| {
                        !matches!(
                            it,
                            Item::Char {
                                kind: GlyphKind::Visible,
                                ..
                            }
                        )
                    })
                    .map_or(items.len(), |n| i + n);
                breaker.place_word(&items[i..word_end]);
                i = word_end;
                continue;
            }
            item @ Item::Char {
                kind: GlyphKind::Space,
                ..
            } => breaker.place_space(item),
            item @ Item::Char {
                kind: GlyphKind::Newline,
                ..
            } => {
                breaker.place_space(item);
                breaker.end_line();
            }
            Item::BlockEdge => {
                if breaker.line_has_content() {
                    breaker.end_line();
                }
            }
            Item::ForcedBreak => breaker.end_line(),
        }
        i += 1;
    }
    breaker.finish(container_style.text_align)
}

fn collect_items(
    document: &Node,
    node: &Node,
    sheet: &Stylesheet,
    measurer: &dyn TextMeasurer,
    out: &mut Vec<Item>,
) {
    match node {
        Node::Text { id, text } => {
            let Some(style) = compute_style_for(document, *id, sheet) else {
                return;
            };
            let line_height = measurer.line_height(&style);
            for point in code_points(text) {
                let kind = if point.ch == '\n' {
                    GlyphKind::Newline
                } else if is_ascii_break_space(point.ch) {
                    GlyphKind::Space
                } else {
                    GlyphKind::Visible
                };
                out.push(Item::Char {
                    node: *id,
                    start: point.start,
                    end: point.end,
                    kind,
                    advance: measurer.advance(point.ch, &style),
                    line_height,
                });
            }
        }
        Node::Element { id, name, children, .. } => {
            if name == "br" {
                out.push(Item::ForcedBreak);
                return;
            }
            let display = compute_style_for(document, *id, sheet)
                .map_or(Display::Inline, |s| s.display);
            match display {
                Display::None => {}
                Display::Inline => {
                    for child in children {
                        collect_items(document, child, sheet, measurer, out);
                    }
                }
                Display::Block => {
                    out.push(Item::BlockEdge);
                    for child in children {
                        collect_items(document, child, sheet, measurer, out);
                    }
                    out.push(Item::BlockEdge);
                }
            }
        }
        Node::Document { .. } | Node::Comment { .. } => {}
    }
}

struct LineBreaker {
    width: f32,
    /// Height of a line with no glyphs.
    strut: f32,
    glyphs: Vec<Glyph>,
    line_ranges: Vec<Range<usize>>,
    line_start: usize,
    cursor: f32,
}

impl LineBreaker {
    fn new(width: f32, strut: f32) -> Self {
        Self {
            width,
            strut,
            glyphs: Vec::new(),
            line_ranges: Vec::new(),
            line_start: 0,
            cursor: 0.0,
        }
    }

    fn line_has_content(&self) -> bool {
        self.glyphs.len() > self.line_start
    }

    fn end_line(&mut self) {
        self.line_ranges.push(self.line_start..self.glyphs.len());
        self.line_start = self.glyphs.len();
        self.cursor = 0.0;
    }

    fn place_word(&mut self, word: &[Item]) {
        let width: f32 = word.iter().map(advance_of).sum();
        if self.line_has_content() && self.cursor + width > self.width {
            self.end_line();
        }
        if width <= self.width {
            for item in word {
                self.push(item, self.cursor, advance_of(item));
            }
            return;
        }
        // Overlong: break between characters.
        for item in word {
            let advance = advance_of(item);
            if self.line_has_content() && self.cursor + advance > self.width {
                self.end_line();
            }
            self.push(item, self.cursor, advance);
        }
    }

    /// Spaces never wrap; past the line end they hang with clamped boxes.
    fn place_space(&mut self, item: &Item) {
        let advance = advance_of(item);
        let left = self.cursor.min(self.width);
        let right = (self.cursor + advance).min(self.width);
        self.push(item, left, right - left);
        self.cursor += advance - (right - left);
    }

    fn push(&mut self, item: &Item, left: f32, width: f32) {
        let Item::Char {
            node,
            start,
            end,
            kind,
            line_height,
            ..
        } = *item
        else {
            return;
        };
        self.glyphs.push(Glyph {
            node,
            start,
            end,
            line: self.line_ranges.len(),
            left,
            right: left + width,
            top: 0.0,
            bottom: 0.0,
            kind,
            line_height,
        });
        self.cursor += width;
    }

    fn finish(mut self, align: TextAlign) -> Flow {
        if self.line_has_content() || self.line_ranges.is_empty() {
            self.end_line();
        }

        let mut lines = Vec::with_capacity(self.line_ranges.len());
        let mut y = 0.0;
        for range in self.line_ranges {
            let glyphs = &mut self.glyphs[range.clone()];
            let height = glyphs
                .iter()
                .map(|g| g.line_height)
                .reduce(f32::max)
                .unwrap_or(self.strut);

            let used = glyphs
                .iter()
                .filter(|g| g.kind == GlyphKind::Visible)
                .map(|g| g.right)
                .reduce(f32::max)
                .unwrap_or(0.0);
            let shift = match align {
                TextAlign::Left => 0.0,
                TextAlign::Center => ((self.width - used) / 2.0).max(0.0),
                TextAlign::Right => (self.width - used).max(0.0),
            };

            for g in glyphs.iter_mut() {
                g.left = (g.left + shift).min(self.width);
                g.right = (g.right + shift).min(self.width);
                g.top = y + (height - g.line_height) / 2.0;
                g.bottom = g.top + g.line_height;
            }
            lines.push(Line {
                top: y,
                bottom: y + height,
                glyphs: range,
            });
            y += height;
        }

        Flow {
            lines,
            glyphs: self.glyphs,
            height: y,
        }
    }
}

fn advance_of(item: &Item) -> f32 {
    match item {
        Item::Char { advance, .. } => *advance,
        _ => 0.0,
    }
}
