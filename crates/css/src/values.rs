use crate::syntax::Declaration;

/// CSS length. `em` and `%` resolve against the parent's font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Em(f32),
    Percent(f32),
}

impl Length {
    pub fn resolve(self, reference_px: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Em(em) => em * reference_px,
            Length::Percent(pct) => pct / 100.0 * reference_px,
        }
    }
}

/// CSS `display`, reduced to what line layout distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum LineHeight {
    #[default]
    Normal,
    Number(f32),
    Length(Length),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// One entry of a `font-family` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FamilyName {
    /// Written as a string: `"Marker Felt"`.
    Quoted(String),
    /// Written as identifiers, whitespace collapsed: `sans-serif`, `Marker Felt`.
    Ident(String),
}

/// Parse a positive, finite `<number>px`, `<number>em`, or `<number>%`.
pub fn parse_length(value: &str) -> Option<Length> {
    let v = value.trim().to_ascii_lowercase();
    let (num, ctor): (&str, fn(f32) -> Length) = if let Some(n) = v.strip_suffix("px") {
        (n, Length::Px)
    } else if let Some(n) = v.strip_suffix("em") {
        (n, Length::Em)
    } else if let Some(n) = v.strip_suffix('%') {
        (n, Length::Percent)
    } else {
        return None;
    };
    let num = num.trim().parse::<f32>().ok()?;
    (num.is_finite() && num > 0.0).then(|| ctor(num))
}

pub fn parse_display(value: &str) -> Option<Display> {
    match value.trim().to_ascii_lowercase().as_str() {
        "block" | "list-item" | "flex" => Some(Display::Block),
        "inline" | "inline-block" => Some(Display::Inline),
        "none" => Some(Display::None),
        _ => None,
    }
}

pub fn parse_font_style(value: &str) -> Option<FontStyle> {
    let v = value.trim().to_ascii_lowercase();
    match v.split_whitespace().next()? {
        "normal" => Some(FontStyle::Normal),
        "italic" => Some(FontStyle::Italic),
        "oblique" => Some(FontStyle::Oblique),
        _ => None,
    }
}

/// Parse `font-weight`. Relative keywords use the simplified mapping
/// (`bolder` → at least 700, `lighter` → at most 100 steps below 400).
pub fn parse_font_weight(value: &str, parent: FontWeight) -> Option<FontWeight> {
    let v = value.trim().to_ascii_lowercase();
    match v.as_str() {
        "normal" => Some(FontWeight::NORMAL),
        "bold" => Some(FontWeight::BOLD),
        "bolder" => Some(parent.max(FontWeight::BOLD)),
        "lighter" => Some(FontWeight(if parent.0 > 400 { 400 } else { 100 })),
        n => {
            let w = n.parse::<u16>().ok()?;
            (1..=1000).contains(&w).then_some(FontWeight(w))
        }
    }
}

pub fn parse_line_height(value: &str) -> Option<LineHeight> {
    let v = value.trim();
    if v.eq_ignore_ascii_case("normal") {
        return Some(LineHeight::Normal);
    }
    if let Ok(n) = v.parse::<f32>() {
        return (n.is_finite() && n >= 0.0).then_some(LineHeight::Number(n));
    }
    parse_length(v).map(LineHeight::Length)
}

pub fn parse_text_align(value: &str) -> Option<TextAlign> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" | "start" | "justify" => Some(TextAlign::Left),
        "center" => Some(TextAlign::Center),
        "right" | "end" => Some(TextAlign::Right),
        _ => None,
    }
}

/// Split a `font-family` list on commas outside quotes.
pub fn parse_font_family(value: &str) -> Option<Vec<FamilyName>> {
    let mut names = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    let mut flush = |current: &mut String| -> Option<()> {
        let raw = current.trim();
        let name = match raw.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let inner = raw.strip_prefix(q)?.strip_suffix(q)?;
                FamilyName::Quoted(inner.to_string())
            }
            Some(_) => FamilyName::Ident(raw.split_whitespace().collect::<Vec<_>>().join(" ")),
            None => return None,
        };
        names.push(name);
        current.clear();
        Some(())
    };

    for ch in value.chars() {
        match (quote, ch) {
            (None, '"' | '\'') => {
                quote = Some(ch);
                current.push(ch);
            }
            (Some(q), c) if c == q => {
                quote = None;
                current.push(ch);
            }
            (None, ',') => flush(&mut current)?,
            _ => current.push(ch),
        }
    }
    if quote.is_some() {
        return None;
    }
    flush(&mut current)?;
    Some(names)
}

pub fn serialize_font_family(names: &[FamilyName]) -> String {
    names
        .iter()
        .map(|name| match name {
            FamilyName::Quoted(s) => format!("\"{s}\""),
            FamilyName::Ident(s) => s.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Expand the `font` shorthand into its longhands. Omitted style, weight,
/// and line-height reset to `normal`. Returns `None` when the value lacks a
/// size or a family.
pub fn expand_font_shorthand(value: &str) -> Option<Vec<Declaration>> {
    let mut style = "normal";
    let mut weight = "normal";
    let mut line_height = "normal";
    let mut rest = value.trim();

    let size = loop {
        let (word, after) = next_word(rest)?;
        let (head, slash_tail) = match word.split_once('/') {
            Some((h, t)) => (h, Some(t)),
            None => (word, None),
        };

        if parse_length(head).is_some() {
            rest = after;
            match slash_tail {
                Some(t) if !t.is_empty() => line_height = t,
                Some(_) => {
                    let (lh, after) = next_word(rest)?;
                    line_height = lh;
                    rest = after;
                }
                None => {
                    if let Some(tail) = rest.trim_start().strip_prefix('/') {
                        let (lh, after) = next_word(tail)?;
                        line_height = lh;
                        rest = after;
                    }
                }
            }
            break head;
        }

        let lower = word.to_ascii_lowercase();
        match lower.as_str() {
            "normal" | "small-caps" => {}
            "italic" | "oblique" => style = word,
            "bold" | "bolder" | "lighter" => weight = word,
            _ if parse_font_weight(word, FontWeight::NORMAL).is_some() => weight = word,
            _ => return None,
        }
        rest = after;
    };

    let family = rest.trim();
    if family.is_empty() || parse_font_family(family).is_none() {
        return None;
    }

    let decl = |name: &str, value: &str| Declaration {
        name: name.to_string(),
        value: value.to_string(),
    };
    Some(vec![
        decl("font-style", style),
        decl("font-weight", weight),
        decl("font-size", size),
        decl("line-height", line_height),
        decl("font-family", family),
    ])
}

fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    Some((&s[..end], &s[end..]))
}

/// Format a px quantity the way computed values print: integral values without
/// a fraction, others rounded to two decimals.
pub fn format_px(px: f32) -> String {
    let rounded = (px * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{rounded}px")
    }
}
