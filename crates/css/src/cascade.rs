use crate::syntax::{Declaration, Selector, Stylesheet, parse_declarations};
use crate::values::expand_font_shorthand;
use html::Node;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
struct Specificity(u16, u16, u16); // (id, class/attribute, type)

// Inline `style` beats every selector.
const INLINE_SPECIFICITY: Specificity = Specificity(u16::MAX, 0, 0);

struct Candidate {
    declaration: Declaration,
    specificity: Specificity,
    order: u32,
}

fn specificity_of(selector: &Selector) -> Specificity {
    match selector {
        Selector::Universal => Specificity(0, 0, 0),
        Selector::Type(_) => Specificity(0, 0, 1),
        Selector::Class(_) => Specificity(0, 1, 0),
        Selector::Id(_) => Specificity(1, 0, 0),
        Selector::Attribute { tag, .. } => Specificity(0, 1, u16::from(tag.is_some())),
    }
}

fn matches_selector(node: &Node, selector: &Selector) -> bool {
    let Some(name) = node.element_name() else {
        return false;
    };
    match selector {
        Selector::Universal => true,
        Selector::Type(t) => name.eq_ignore_ascii_case(t),
        Selector::Id(want) => node.attr("id") == Some(want.as_str()),
        Selector::Class(want) => node
            .attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == want)),
        Selector::Attribute { tag, name: attr } => {
            tag.as_deref().is_none_or(|t| name.eq_ignore_ascii_case(t)) && node.has_attr(attr)
        }
    }
}

/// If the element has an inline style attribute, return its value.
pub fn get_inline_style(node: &Node) -> Option<&str> {
    node.attr("style")
}

/// Resolve the winning declaration per longhand property for one element:
/// matched stylesheet rules plus its inline style, with shorthands expanded.
///
/// The result is ordered by cascade precedence (lowest first), so applying it
/// front to back leaves every property at its winning value.
pub fn cascaded_declarations(node: &Node, sheet: &Stylesheet) -> Vec<Declaration> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for (order, rule) in sheet.rules.iter().enumerate() {
        let specificity = rule
            .selectors
            .iter()
            .filter(|s| matches_selector(node, s))
            .map(specificity_of)
            .max();
        if let Some(specificity) = specificity {
            push_expanded(&mut candidates, &rule.declarations, specificity, order as u32);
        }
    }

    if let Some(inline) = get_inline_style(node) {
        let declarations = parse_declarations(inline);
        push_expanded(&mut candidates, &declarations, INLINE_SPECIFICITY, u32::MAX);
    }

    // Stable sort keeps source order within a (specificity, order) tie, so a
    // later declaration in the same block still wins.
    candidates.sort_by(|a, b| (a.specificity, a.order).cmp(&(b.specificity, b.order)));

    let mut winners: Vec<Declaration> = Vec::new();
    for candidate in candidates {
        winners.retain(|d| d.name != candidate.declaration.name);
        winners.push(candidate.declaration);
    }
    winners
}

fn push_expanded(
    candidates: &mut Vec<Candidate>,
    declarations: &[Declaration],
    specificity: Specificity,
    order: u32,
) {
    for declaration in declarations {
        let expanded = if declaration.name == "font" {
            match expand_font_shorthand(&declaration.value) {
                Some(longhands) => longhands,
                None => {
                    log::debug!(target: "css", "ignoring invalid font shorthand: {:?}", declaration.value);
                    continue;
                }
            }
        } else {
            vec![declaration.clone()]
        };
        candidates.extend(expanded.into_iter().map(|declaration| Candidate {
            declaration,
            specificity,
            order,
        }));
    }
}
