use crate::flow::{Flow, Glyph, GlyphKind, layout_container};
use crate::measure::{MonoMeasurer, TextMeasurer};
use crate::scene::{Scene, SceneError};
use core_types::{Point, Rect, Size};
use css::{Stylesheet, compute_style_for, parse_stylesheet};
use html::traverse::{descendants, find_node_by_id, text_content};
use html::{Id, Node, SimpleSelector, query_selector_all};
use layout::{CaretPosition, CaretRange, CaretSupport, LayoutHost};
use std::borrow::Cow;
use std::collections::HashSet;

/// A laid-out scene that answers geometry queries the way a browser would
/// for a container of styled text spans.
pub struct SimHost {
    document: Node,
    sheet: Stylesheet,
    container: Id,
    border_box: Rect,
    /// Viewport position of the content box.
    content_origin: Point,
    flow: Flow,
    caret: CaretSupport,
    span_selector: SimpleSelector,
}

impl SimHost {
    pub fn new(scene: &Scene) -> Result<Self, SceneError> {
        let measurer = MonoMeasurer {
            advance_ratio: scene.advance_ratio,
            normal_line_height: scene.normal_line_height,
        };
        Self::with_measurer(scene, &measurer)
    }

    pub fn with_measurer(scene: &Scene, measurer: &dyn TextMeasurer) -> Result<Self, SceneError> {
        scene.validate()?;
        let document = html::parse_document(&scene.markup);
        let sheet = parse_stylesheet(&scene.stylesheet);

        let container_node = descendants(&document)
            .find(|n| match scene.container.as_deref() {
                Some(want) => n.attr("id") == Some(want),
                None => n.element_name().is_some(),
            })
            .ok_or_else(|| SceneError::MissingContainer {
                id: scene.container.clone(),
            })?;

        let flow = layout_container(&document, container_node, &sheet, measurer, scene.width);
        let [x, y] = scene.origin;
        let pad = scene.padding;
        let border_box = Rect::from_xywh(x, y, scene.width + 2.0 * pad, flow.height + 2.0 * pad);
        let container = container_node.id();
        log::debug!(
            target: "sim_host",
            "laid out container {container:?}: {} lines, {} glyphs, {}x{}",
            flow.lines.len(),
            flow.glyphs.len(),
            border_box.width(),
            border_box.height()
        );

        Ok(Self {
            document,
            sheet,
            container,
            border_box,
            content_origin: Point::new(x + pad, y + pad),
            flow,
            caret: CaretSupport {
                position_from_point: scene.caret.position_from_point,
                range_from_point: scene.caret.range_from_point,
            },
            span_selector: SimpleSelector {
                tag: Some("span".to_string()),
                attribute: Some("data-text".to_string()),
            },
        })
    }

    pub fn from_toml_str(input: &str) -> Result<Self, SceneError> {
        Self::new(&Scene::from_toml_str(input)?)
    }

    /// The element extraction should run against.
    pub fn container(&self) -> Id {
        self.container
    }

    pub fn document(&self) -> &Node {
        &self.document
    }

    pub fn set_caret_support(&mut self, caret: CaretSupport) {
        self.caret = caret;
    }

    fn node(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.document, id)
    }

    fn glyph_rect(&self, g: &Glyph) -> Rect {
        let Point { x, y } = self.content_origin;
        Rect::new(g.left + x, g.top + y, g.right + x, g.bottom + y)
    }

    /// One box per line for the glyphs accepted by `keep`.
    fn line_boxes(&self, keep: impl Fn(&Glyph) -> bool) -> Vec<Rect> {
        let mut boxes: Vec<(usize, Rect)> = Vec::new();
        for g in self.flow.glyphs.iter().filter(|&g| keep(g)) {
            let rect = self.glyph_rect(g);
            match boxes.last_mut() {
                Some((line, acc)) if *line == g.line => *acc = acc.union(&rect),
                _ => boxes.push((g.line, rect)),
            }
        }
        boxes.into_iter().map(|(_, r)| r).collect()
    }

    /// Text position under a viewport point: the nearer edge of the glyph
    /// hit, the line start left of the text, the line end right of it.
    fn hit_test(&self, p: Point) -> Option<(Id, usize)> {
        if p.y < self.border_box.top || p.y > self.border_box.bottom {
            return None;
        }
        let local = Point::new(p.x - self.content_origin.x, p.y - self.content_origin.y);
        let line = self
            .flow
            .lines
            .iter()
            .find(|l| local.y < l.bottom)
            .or(self.flow.lines.last())?;
        let glyphs = self.flow.line_glyphs(line);
        let first = glyphs.first()?;
        if local.x < first.left {
            return Some((first.node, first.start));
        }
        if let Some(g) = glyphs
            .iter()
            .find(|g| g.right > g.left && local.x >= g.left && local.x < g.right)
        {
            let offset = if local.x < (g.left + g.right) / 2.0 {
                g.start
            } else {
                g.end
            };
            return Some((g.node, offset));
        }
        let last = glyphs.last()?;
        Some(match last.kind {
            GlyphKind::Newline => (last.node, last.start),
            GlyphKind::Visible | GlyphKind::Space => (last.node, last.end),
        })
    }
}

impl LayoutHost for SimHost {
    type Node = Id;

    fn bounding_client_rect(&self, element: Id) -> Rect {
        if element == self.container {
            return self.border_box;
        }
        self.client_rects(element)
            .into_iter()
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Rect::ZERO)
    }

    fn offset_size(&self, element: Id) -> Size {
        let rect = self.bounding_client_rect(element);
        Size {
            width: rect.width(),
            height: rect.height(),
        }
    }

    fn text_spans(&self, container: Id) -> Vec<Id> {
        self.node(container)
            .map(|root| {
                query_selector_all(root, &self.span_selector)
                    .into_iter()
                    .map(Node::id)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn first_child(&self, node: Id) -> Option<Id> {
        self.node(node)?.children().first().map(Node::id)
    }

    fn text_content(&self, node: Id) -> Option<Cow<'_, str>> {
        match self.node(node)? {
            Node::Text { text, .. } | Node::Comment { text, .. } => {
                Some(Cow::Borrowed(text.as_str()))
            }
            element @ Node::Element { .. } => Some(Cow::Owned(text_content(element))),
            Node::Document { .. } => None,
        }
    }

    fn computed_font(&self, element: Id) -> Option<String> {
        self.node(element)?.element_name()?;
        compute_style_for(&self.document, element, &self.sheet).map(|s| s.font_shorthand())
    }

    fn client_rects(&self, element: Id) -> Vec<Rect> {
        let Some(node) = self.node(element) else {
            return Vec::new();
        };
        let texts: HashSet<Id> = descendants(node)
            .filter(|n| matches!(n, Node::Text { .. }))
            .map(Node::id)
            .collect();
        self.line_boxes(|g| texts.contains(&g.node))
    }

    fn range_client_rects(&self, node: Id, start: usize, end: usize) -> Vec<Rect> {
        if start >= end {
            return Vec::new();
        }
        self.line_boxes(|g| g.node == node && g.start >= start && g.end <= end)
    }

    fn caret_support(&self) -> CaretSupport {
        self.caret
    }

    fn caret_position_from_point(&self, point: Point) -> Option<CaretPosition<Id>> {
        self.hit_test(point).map(|(offset_node, offset)| CaretPosition {
            offset_node,
            offset,
        })
    }

    fn caret_range_from_point(&self, point: Point) -> Option<CaretRange<Id>> {
        self.hit_test(point)
            .map(|(node, offset)| CaretRange::collapsed(node, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "div { font: 20px/20px monospace }";

    fn host(markup: &str, width: f32) -> SimHost {
        let mut scene = Scene::new(markup);
        scene.stylesheet = SHEET.to_string();
        scene.origin = [100.0, 50.0];
        scene.width = width;
        SimHost::new(&scene).expect("valid scene")
    }

    fn span_ids(host: &SimHost) -> Vec<Id> {
        host.text_spans(host.container())
    }

    #[test]
    fn finds_text_spans_in_document_order() {
        let host = host(
            "<div><p><span data-text>a</span><span>b</span></p><span data-text>c</span></div>",
            200.0,
        );
        let spans = span_ids(&host);
        assert_eq!(spans.len(), 2);
        let text = host.first_child(spans[1]).expect("text child");
        assert_eq!(host.text_content(text).as_deref(), Some("c"));
    }

    #[test]
    fn container_box_includes_padding() {
        let mut scene = Scene::new("<div id=editor><span data-text>ab</span></div>");
        scene.stylesheet = SHEET.to_string();
        scene.container = Some("editor".to_string());
        scene.origin = [10.0, 20.0];
        scene.width = 100.0;
        scene.padding = 5.0;
        let host = SimHost::new(&scene).expect("valid scene");

        let c = host.container();
        assert_eq!(host.bounding_client_rect(c), Rect::new(10.0, 20.0, 120.0, 50.0));
        assert_eq!(host.offset_size(c), Size { width: 110.0, height: 30.0 });
        let span = span_ids(&host)[0];
        assert_eq!(host.client_rects(span), [Rect::new(15.0, 25.0, 35.0, 45.0)]);
    }

    #[test]
    fn missing_container_is_an_error() {
        let mut scene = Scene::new("<div></div>");
        scene.container = Some("nope".to_string());
        assert!(matches!(
            SimHost::new(&scene),
            Err(SceneError::MissingContainer { .. })
        ));
    }

    #[test]
    fn span_rects_follow_line_fragments() {
        let host = host("<div><span data-text>Hello world</span></div>", 60.0);
        let span = span_ids(&host)[0];
        assert_eq!(
            host.client_rects(span),
            [
                Rect::new(100.0, 50.0, 160.0, 70.0),
                Rect::new(100.0, 70.0, 150.0, 90.0)
            ]
        );
    }

    #[test]
    fn range_rects_cover_code_points() {
        let host = host("<div><span data-text>a😀b</span></div>", 200.0);
        let text = host.first_child(span_ids(&host)[0]).expect("text");
        assert_eq!(
            host.range_client_rects(text, 1, 3),
            [Rect::new(110.0, 50.0, 120.0, 70.0)]
        );
        assert!(host.range_client_rects(text, 2, 2).is_empty());
        assert_eq!(host.range_bounding_rect(text, 0, 4), Rect::new(100.0, 50.0, 130.0, 70.0));
    }

    #[test]
    fn caret_hit_testing_snaps_to_nearest_edge() {
        let host = host("<div><span data-text>Hello world</span></div>", 60.0);
        let text = host.first_child(span_ids(&host)[0]).expect("text");
        let caret = |x: f32, y: f32| {
            host.caret_position_from_point(Point::new(x, y))
                .map(|c| (c.offset_node, c.offset))
        };
        assert_eq!(caret(101.0, 51.0), Some((text, 0)));
        assert_eq!(caret(108.0, 51.0), Some((text, 1)));
        assert_eq!(caret(161.0, 51.0), Some((text, 6)));
        assert_eq!(caret(90.0, 71.0), Some((text, 6)));
        assert_eq!(caret(151.0, 71.0), Some((text, 11)));
        assert_eq!(caret(101.0, 10.0), None);
    }

    #[test]
    fn computed_font_reports_the_shorthand() {
        let host = host(
            "<div><span data-text style=\"font: italic 300 80px 'Marker Felt'\">x</span></div>",
            200.0,
        );
        let span = span_ids(&host)[0];
        assert_eq!(
            host.computed_font(span).as_deref(),
            Some("italic 300 80px \"Marker Felt\"")
        );
        let text = host.first_child(span).expect("text");
        assert_eq!(host.computed_font(text), None);
    }
}
