use crate::traverse::assign_node_ids;
use crate::types::{Id, Node, Token};

/// Build a document tree from a token stream.
///
/// Open elements live on an explicit stack and are attached to their parent
/// when closed, so arbitrarily deep markup never recurses. Unmatched end tags
/// are ignored; elements still open at the end are closed implicitly. Adjacent
/// text tokens merge into one text node, the way a DOM normalizes them.
pub fn build_dom(tokens: Vec<Token>) -> Node {
    let mut open: Vec<Node> = vec![Node::Document {
        id: Id(0),
        doctype: None,
        children: Vec::new(),
    }];

    for token in tokens {
        match token {
            Token::Doctype(value) => {
                if let Some(Node::Document { doctype, .. }) = open.first_mut() {
                    *doctype = Some(value);
                }
            }
            Token::Comment(text) => append(&mut open, Node::Comment { id: Id(0), text }),
            Token::Text(text) => append_text(&mut open, text),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let element = Node::Element {
                    id: Id(0),
                    name,
                    attributes,
                    children: Vec::new(),
                };
                if self_closing {
                    append(&mut open, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                let Some(depth) = open.iter().rposition(|n| n.is_element_named(&name)) else {
                    continue;
                };
                while open.len() > depth {
                    close_top(&mut open);
                }
            }
        }
    }

    while open.len() > 1 {
        close_top(&mut open);
    }

    let mut root = open.pop().unwrap_or(Node::Document {
        id: Id(0),
        doctype: None,
        children: Vec::new(),
    });
    assign_node_ids(&mut root);
    root
}

fn append(open: &mut [Node], node: Node) {
    if let Some(children) = open.last_mut().and_then(Node::children_mut) {
        children.push(node);
    }
}

fn append_text(open: &mut [Node], text: String) {
    if text.is_empty() {
        return;
    }
    let Some(children) = open.last_mut().and_then(Node::children_mut) else {
        return;
    };
    if let Some(Node::Text { text: prev, .. }) = children.last_mut() {
        prev.push_str(&text);
    } else {
        children.push(Node::Text { id: Id(0), text });
    }
}

fn close_top(open: &mut Vec<Node>) {
    if open.len() < 2 {
        return;
    }
    if let Some(node) = open.pop() {
        append(open, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn nests_and_numbers_nodes_in_document_order() {
        let dom = build_dom(tokenize("<div><span>a</span><span>b</span></div>"));
        let div = &dom.children()[0];
        assert_eq!(dom.id(), Id(1));
        assert_eq!(div.id(), Id(2));
        let spans = div.children();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].id(), Id(3));
        assert_eq!(spans[0].children()[0].id(), Id(4));
        assert_eq!(spans[1].id(), Id(5));
    }

    #[test]
    fn unmatched_end_tag_is_ignored() {
        let dom = build_dom(tokenize("<div>x</p>y</div>"));
        let div = &dom.children()[0];
        assert!(matches!(&div.children()[0], Node::Text { text, .. } if text == "xy"));
    }

    #[test]
    fn unclosed_elements_close_at_end() {
        let dom = build_dom(tokenize("<div><span>open"));
        let span = &dom.children()[0].children()[0];
        assert!(span.is_element_named("span"));
        assert_eq!(span.children().len(), 1);
    }

    #[test]
    fn deep_nesting_does_not_recurse_while_building() {
        let depth = 5_000;
        let markup = "<b>".repeat(depth) + &"</b>".repeat(depth);
        let dom = build_dom(tokenize(&markup));
        let mut current = &dom.children()[0];
        let mut seen = 1;
        while let Some(next) = current.children().first() {
            current = next;
            seen += 1;
        }
        assert_eq!(seen, depth);
    }
}
