//! Tree construction.
//!
//! A stack of open elements in the spirit of
//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements),
//! without insertion modes: every end tag closes the current node whatever
//! its name.

use std::fmt::Write as _;

use wren_dom::{DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{HtmlError, Token, tokenize};

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// Elements that never have children and are never pushed on the stack.
pub const VOID_ELEMENTS: &[&str] = &["meta", "link", "img", "br", "hr", "input"];

/// Whether `tag` is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Build a DOM tree from a token stream.
///
/// - A start tag creates an element, appended to the current node or made
///   the root when the stack is empty. Non-void elements are pushed.
/// - Text is appended to the current node. With an empty stack an `html`
///   and `body` pair is created first, becomes the root, and the text goes
///   into the body.
/// - An end tag pops the current node. On an empty stack it is ignored.
#[must_use]
pub fn parse(tokens: Vec<Token>) -> DomTree {
    let mut tree = DomTree::new();
    let mut stack: Vec<NodeId> = Vec::new();

    for token in tokens {
        match token {
            Token::StartTag { name, attributes } => {
                let is_void = is_void_element(&name);
                let element = tree.alloc_element(ElementData {
                    tag_name: name,
                    attrs: attributes.into_iter().collect(),
                });
                match stack.last() {
                    Some(&parent) => tree.append_child(parent, element),
                    None => tree.set_root(element),
                }
                if !is_void {
                    stack.push(element);
                }
            }
            Token::Text(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                if stack.is_empty() {
                    let html = tree.alloc_element(ElementData::new("html"));
                    let body = tree.alloc_element(ElementData::new("body"));
                    tree.append_child(html, body);
                    tree.set_root(html);
                    stack.push(html);
                    stack.push(body);
                }
                let text = tree.alloc_text(text);
                if let Some(&parent) = stack.last() {
                    tree.append_child(parent, text);
                }
            }
            Token::EndTag { .. } => {
                let _ = stack.pop();
            }
        }
    }

    tree
}

/// Tokenize and build in one step.
///
/// # Errors
///
/// Propagates [`HtmlError::MalformedMarkup`] from the tokenizer.
pub fn parse_document(html: &str) -> Result<DomTree, HtmlError> {
    Ok(parse(tokenize(html)?))
}

/// Render the tree as an indented outline, one node per line.
#[must_use]
pub fn dump_tree(tree: &DomTree) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        dump_node(tree, root, 0, &mut out);
    }
    out
}

fn dump_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            let mut attrs: Vec<String> = data
                .attrs
                .iter()
                .map(|(k, v)| format!("{k}=\"{v}\""))
                .collect();
            attrs.sort();
            if attrs.is_empty() {
                let _ = writeln!(out, "{prefix}<{}>", data.tag_name);
            } else {
                let _ = writeln!(out, "{prefix}<{} {}>", data.tag_name, attrs.join(" "));
            }
        }
        NodeType::Text(data) => {
            let _ = writeln!(out, "{prefix}\"{data}\"");
        }
    }
    for &child in tree.children(id) {
        dump_node(tree, child, indent + 1, out);
    }
}

/// Print the tree outline to stdout.
pub fn print_tree(tree: &DomTree) {
    print!("{}", dump_tree(tree));
}
