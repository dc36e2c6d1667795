// A single CSS property: "font-size: 16px"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

// Set of selectors and declarations
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
    /// `[attr]` or `tag[attr]` presence selector.
    Attribute { tag: Option<String>, name: String },
}

// A full stylesheet: multiple rules
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

// input: "div, #id { color: red; } span[data-text] { font-size: 12px; }"
pub fn parse_stylesheet(input: &str) -> Stylesheet {
    let mut rules = Vec::new();
    for block in strip_comments(input).split('}') {
        if let Some((selector_str, declaration_str)) = block.split_once('{') {
            let selectors = selector_str
                .split(',')
                .filter_map(parse_selector_one)
                .collect::<Vec<_>>();
            if selectors.is_empty() {
                continue;
            }
            let declarations = parse_declarations(declaration_str);
            if declarations.is_empty() {
                continue;
            }
            rules.push(Rule {
                selectors,
                declarations,
            });
        }
    }
    Stylesheet { rules }
}

// input: "font: italic 300 80px \"Marker Felt\"; color: red"
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            let value = v.trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                name,
                value: value.to_string(),
            })
        })
        .collect()
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// input: "#id", ".class", "div", "*", "span[data-text]"
fn parse_selector_one(s: &str) -> Option<Selector> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s == "*" {
        return Some(Selector::Universal);
    }
    if let Some(id) = s.strip_prefix('#') {
        return is_ident(id).then(|| Selector::Id(id.to_string()));
    }
    if let Some(class) = s.strip_prefix('.') {
        return is_ident(class).then(|| Selector::Class(class.to_string()));
    }
    if let Some((tag, rest)) = s.split_once('[') {
        let name = rest.strip_suffix(']')?.trim();
        if !is_ident(name) || !(tag.is_empty() || is_ident(tag)) {
            return None;
        }
        return Some(Selector::Attribute {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            name: name.to_ascii_lowercase(),
        });
    }
    is_ident(s).then(|| Selector::Type(s.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules_with_attribute_selectors() {
        let sheet = parse_stylesheet(
            "/* editor */ .editor, div { font: 80px serif; } span[data-text] { font-weight: bold }",
        );
        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(
            sheet.rules[0].selectors,
            vec![Selector::Class("editor".into()), Selector::Type("div".into())]
        );
        assert_eq!(
            sheet.rules[1].selectors,
            vec![Selector::Attribute {
                tag: Some("span".into()),
                name: "data-text".into()
            }]
        );
    }

    #[test]
    fn declarations_keep_quoted_values() {
        let decls = parse_declarations("FONT: italic 300 80px \"Marker Felt\"; ; bogus");
        assert_eq!(
            decls,
            vec![Declaration {
                name: "font".into(),
                value: "italic 300 80px \"Marker Felt\"".into()
            }]
        );
    }

    #[test]
    fn rejects_unsupported_selectors() {
        let sheet = parse_stylesheet("div > span { color: red } a:hover { color: blue }");
        assert!(sheet.rules.is_empty());
    }
}
