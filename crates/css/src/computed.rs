use crate::cascade::cascaded_declarations;
use crate::syntax::{Declaration, Stylesheet};
use crate::values::{
    Display, FamilyName, FontStyle, FontWeight, LineHeight, TextAlign, format_px,
    parse_display, parse_font_family, parse_font_style, parse_font_weight, parse_length,
    parse_line_height, parse_text_align, serialize_font_family,
};
use html::{Id, Node};

/// Default ratio of `line-height: normal` to font size.
pub const NORMAL_LINE_HEIGHT_FACTOR: f32 = 1.2;

#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    /// Inherited. Initial: normal.
    pub font_style: FontStyle,
    /// Inherited. Initial: 400.
    pub font_weight: FontWeight,
    /// Inherited, always resolved to px. Initial: 16px.
    pub font_size: f32,
    /// Inherited. Initial: normal.
    pub line_height: LineHeight,
    /// Inherited. Initial: `serif`.
    pub font_family: Vec<FamilyName>,
    /// Inherited. Initial: left.
    pub text_align: TextAlign,
    /// Not inherited; the initial value comes from the element's tag.
    pub display: Display,
}

impl ComputedStyle {
    pub fn initial() -> Self {
        ComputedStyle {
            font_style: FontStyle::Normal,
            font_weight: FontWeight::NORMAL,
            font_size: 16.0,
            line_height: LineHeight::Normal,
            font_family: vec![FamilyName::Ident("serif".to_string())],
            text_align: TextAlign::Left,
            display: Display::Block,
        }
    }

    /// Starting point for a child element: inherited properties copied,
    /// `display` taken from the tag's default.
    fn inherit_for(&self, tag: &str) -> Self {
        ComputedStyle {
            display: default_display(tag),
            ..self.clone()
        }
    }

    /// Used line height in px.
    pub fn line_height_px(&self) -> f32 {
        match self.line_height {
            LineHeight::Normal => self.font_size * NORMAL_LINE_HEIGHT_FACTOR,
            LineHeight::Number(n) => self.font_size * n,
            LineHeight::Length(len) => len.resolve(self.font_size),
        }
    }

    /// Serialize the computed `font` shorthand the way `getComputedStyle`
    /// reports it: `normal` style/weight omitted, `/ <line-height>` only when
    /// line-height is not `normal`.
    ///
    /// `italic 300 80px "Marker Felt"`, `16px sans-serif`, `700 12px / 18px serif`
    pub fn font_shorthand(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        match self.font_style {
            FontStyle::Normal => {}
            FontStyle::Italic => parts.push("italic".to_string()),
            FontStyle::Oblique => parts.push("oblique".to_string()),
        }
        if self.font_weight != FontWeight::NORMAL {
            parts.push(self.font_weight.0.to_string());
        }
        parts.push(format_px(self.font_size));
        if self.line_height != LineHeight::Normal {
            parts.push("/".to_string());
            parts.push(format_px(self.line_height_px()));
        }
        parts.push(serialize_font_family(&self.font_family));
        parts.join(" ")
    }

    fn apply(&mut self, declaration: &Declaration, parent: &ComputedStyle) {
        let value = declaration.value.as_str();
        match declaration.name.as_str() {
            "font-style" => {
                if let Some(v) = parse_font_style(value) {
                    self.font_style = v;
                }
            }
            "font-weight" => {
                if let Some(v) = parse_font_weight(value, parent.font_weight) {
                    self.font_weight = v;
                }
            }
            "font-size" => {
                // em/% resolve against the parent, not against our own value.
                if let Some(len) = parse_length(value) {
                    self.font_size = len.resolve(parent.font_size);
                }
            }
            "line-height" => {
                if let Some(v) = parse_line_height(value) {
                    self.line_height = v;
                }
            }
            "font-family" => {
                if let Some(v) = parse_font_family(value) {
                    self.font_family = v;
                }
            }
            "text-align" => {
                if let Some(v) = parse_text_align(value) {
                    self.text_align = v;
                }
            }
            "display" => {
                if let Some(v) = parse_display(value) {
                    self.display = v;
                }
            }
            _ => {}
        }
    }
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self::initial()
    }
}

/// User-agent default `display` per tag.
pub fn default_display(tag: &str) -> Display {
    match tag.to_ascii_lowercase().as_str() {
        "html" | "body" | "div" | "p" | "section" | "article" | "blockquote" | "li" | "ul"
        | "ol" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "pre" => Display::Block,
        "head" | "style" | "script" | "title" | "meta" | "link" => Display::None,
        _ => Display::Inline,
    }
}

/// Compute the style of the element `id` by cascading and inheriting along its
/// ancestor chain. Non-element targets (text nodes) get their parent's style.
pub fn compute_style_for(root: &Node, id: Id, sheet: &Stylesheet) -> Option<ComputedStyle> {
    let path = html::traverse::path_to(root, id)?;
    let mut style = ComputedStyle::initial();
    for node in path {
        let Some(tag) = node.element_name() else {
            continue;
        };
        let parent = style.clone();
        style = parent.inherit_for(tag);
        for declaration in cascaded_declarations(node, sheet) {
            style.apply(&declaration, &parent);
        }
    }
    Some(style)
}
