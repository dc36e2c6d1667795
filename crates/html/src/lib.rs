//! Markup model for rendered editor fragments: a small tokenizer, a tree
//! builder, traversal helpers, and the `tag[attr]` query used to locate
//! text-bearing spans.

pub mod query;
pub mod traverse;

mod dom_builder;
mod entities;
mod tokenizer;
mod types;

pub use crate::dom_builder::build_dom;
pub use crate::query::{SimpleSelector, query_selector_all};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Id, Node, NodeId, Token};

/// Tokenize and build `input` into a document with ids assigned.
pub fn parse_document(input: &str) -> Node {
    build_dom(tokenize(input))
}
