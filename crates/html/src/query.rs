use crate::Node;
use crate::traverse::descendants;

/// A compound selector of the shape `tag`, `[attr]`, or `tag[attr]`.
///
/// This is the subset needed to find text-bearing spans (`span[data-text]`)
/// and nothing more; combinators and attribute values are not supported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub attribute: Option<String>,
}

impl SimpleSelector {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (tag, attribute) = match input.split_once('[') {
            Some((tag, rest)) => {
                let attr = rest.strip_suffix(']')?.trim();
                if attr.is_empty() || !attr.bytes().all(is_ident_byte) {
                    return None;
                }
                (tag, Some(attr.to_ascii_lowercase()))
            }
            None => (input, None),
        };
        if !tag.bytes().all(is_ident_byte) {
            return None;
        }
        let tag = (!tag.is_empty()).then(|| tag.to_ascii_lowercase());
        if tag.is_none() && attribute.is_none() {
            return None;
        }
        Some(Self { tag, attribute })
    }

    pub fn matches(&self, node: &Node) -> bool {
        let Some(name) = node.element_name() else {
            return false;
        };
        let tag_ok = self
            .tag
            .as_deref()
            .is_none_or(|tag| name.eq_ignore_ascii_case(tag));
        let attr_ok = self
            .attribute
            .as_deref()
            .is_none_or(|attr| node.has_attr(attr));
        tag_ok && attr_ok
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// `querySelectorAll`: matching descendants of `root` (never `root` itself),
/// in document order.
pub fn query_selector_all<'a>(root: &'a Node, selector: &SimpleSelector) -> Vec<&'a Node> {
    descendants(root)
        .skip(1)
        .filter(|n| selector.matches(n))
        .collect()
}
