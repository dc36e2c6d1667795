use crate::{Id, Node};

/// Number nodes in document (pre-)order starting at 1. Nodes that already
/// carry a non-zero id keep it.
pub fn assign_node_ids(root: &mut Node) {
    let mut next = 1u32;
    let mut stack: Vec<&mut Node> = vec![root];
    while let Some(node) = stack.pop() {
        if node.id() == Id(0) {
            node.set_id(Id(next));
            next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            // Reverse so children are numbered left to right.
            stack.extend(children.iter_mut().rev());
        }
    }
}

/// Pre-order iterator over `root` and all of its descendants.
pub fn descendants(root: &Node) -> Descendants<'_> {
    Descendants { stack: vec![root] }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

pub fn find_node_by_id(root: &Node, id: Id) -> Option<&Node> {
    descendants(root).find(|n| n.id() == id)
}

/// Nodes from `root` down to and including the node with `id`.
pub fn path_to(root: &Node, id: Id) -> Option<Vec<&Node>> {
    fn walk<'a>(node: &'a Node, id: Id, path: &mut Vec<&'a Node>) -> bool {
        path.push(node);
        if node.id() == id {
            return true;
        }
        for child in node.children() {
            if walk(child, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    walk(root, id, &mut path).then_some(path)
}

/// DOM `textContent`: the node's own data for text and comments, the
/// concatenated descendant text for elements and documents.
pub fn text_content(node: &Node) -> String {
    match node {
        Node::Text { text, .. } | Node::Comment { text, .. } => text.clone(),
        _ => descendants(node)
            .filter_map(|n| match n {
                Node::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn descendants_walk_in_document_order() {
        let dom = parse_document("<p><b>one</b> two</p>");
        let names: Vec<_> = descendants(&dom)
            .map(|n| match n {
                Node::Document { .. } => "#document".to_string(),
                Node::Element { name, .. } => name.clone(),
                Node::Text { text, .. } => format!("#text {text}"),
                Node::Comment { .. } => "#comment".to_string(),
            })
            .collect();
        assert_eq!(
            names,
            ["#document", "p", "b", "#text one", "#text  two"]
        );
    }

    #[test]
    fn path_and_text_content() {
        let dom = parse_document("<div><span>Hi</span><span> there</span></div>");
        let second_text = Id(6);
        let path = path_to(&dom, second_text).expect("text node exists");
        assert_eq!(path.len(), 4);
        assert!(path[2].is_element_named("span"));
        assert_eq!(text_content(&dom), "Hi there");
        assert_eq!(text_content(path[3]), " there");
        assert!(find_node_by_id(&dom, Id(99)).is_none());
    }
}
