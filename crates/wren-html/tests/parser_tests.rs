//! Integration tests for the HTML tree builder.

use wren_dom::{DomTree, NodeId};
use wren_html::{Token, dump_tree, parse, parse_document};

/// Helper to parse HTML and return the DOM tree
fn parse_html(html: &str) -> DomTree {
    parse_document(html).unwrap()
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if tree.tag_name(from) == Some(tag) {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

fn root(tree: &DomTree) -> NodeId {
    tree.root().unwrap()
}

#[test]
fn test_paragraph_is_root() {
    let tree = parse_html("<p>Hello</p>");
    let p = root(&tree);
    assert_eq!(tree.tag_name(p), Some("p"));
    assert_eq!(tree.children(p).len(), 1);
    assert_eq!(tree.as_text(tree.children(p)[0]), Some("Hello"));
}

#[test]
fn test_nested_siblings() {
    let tree = parse_html("<div><p>A</p><p>B</p></div>");
    let div = root(&tree);
    assert_eq!(tree.tag_name(div), Some("div"));
    let children = tree.children(div);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.tag_name(children[0]), Some("p"));
    assert_eq!(tree.tag_name(children[1]), Some("p"));
    assert_eq!(tree.text_content(children[0]), "A");
    assert_eq!(tree.text_content(children[1]), "B");
    assert_eq!(tree.parent(children[1]), Some(div));
}

#[test]
fn test_void_elements_are_not_pushed() {
    let tree = parse_html(r#"<div><img src="a.png"><br><p>after</p></div>"#);
    let div = root(&tree);
    let tags: Vec<_> = tree
        .children(div)
        .iter()
        .map(|&id| tree.tag_name(id).unwrap())
        .collect();
    assert_eq!(tags, vec!["img", "br", "p"]);
    let img = find_element(&tree, div, "img").unwrap();
    assert!(tree.children(img).is_empty());
    assert_eq!(tree.get_attribute(img, "src"), Some("a.png"));
}

#[test]
fn test_leading_text_fabricates_html_and_body() {
    let tree = parse_html("Hello <b>there</b>");
    let html = root(&tree);
    assert_eq!(tree.tag_name(html), Some("html"));
    let body = tree.children(html)[0];
    assert_eq!(tree.tag_name(body), Some("body"));
    assert_eq!(tree.as_text(tree.children(body)[0]), Some("Hello"));
    assert_eq!(tree.tag_name(tree.children(body)[1]), Some("b"));
}

#[test]
fn test_text_after_closed_root_starts_a_new_root() {
    // Like a start tag on an empty stack, stray text replaces the root.
    let tree = parse_html("<p>x</p>tail<div>more</div>");
    let html = root(&tree);
    assert_eq!(tree.tag_name(html), Some("html"));
    let body = find_element(&tree, html, "body").unwrap();
    assert_eq!(tree.as_text(tree.children(body)[0]), Some("tail"));
    let div = find_element(&tree, body, "div").unwrap();
    assert_eq!(tree.text_content(div), "more");
    assert_eq!(tree.text_content(html), "tailmore");
}

#[test]
fn test_end_tags_pop_without_name_check() {
    // </span> closes the <p>, so "tail" lands in the div.
    let tree = parse_html("<div><p>x</span>tail</div>");
    let div = root(&tree);
    let children = tree.children(div);
    assert_eq!(children.len(), 2);
    assert_eq!(tree.as_text(children[1]), Some("tail"));
}

#[test]
fn test_end_tag_on_empty_stack_is_ignored() {
    let tree = parse(vec![Token::end("p"), Token::start("div"), Token::end("div")]);
    let div = root(&tree);
    assert_eq!(tree.tag_name(div), Some("div"));
}

#[test]
fn test_first_start_tag_stays_root() {
    let tree = parse_html("<html><head><title>T</title></head><body><p>x</p></body></html>");
    let html = root(&tree);
    assert_eq!(tree.tag_name(html), Some("html"));
    let body = find_element(&tree, html, "body").unwrap();
    let p = find_element(&tree, body, "p").unwrap();
    assert_eq!(tree.ancestors(p).collect::<Vec<_>>(), vec![body, html]);
}

#[test]
fn test_empty_input_has_no_root() {
    let tree = parse_html("  \n ");
    assert!(tree.root().is_none());
}

#[test]
fn test_malformed_markup_propagates() {
    assert!(parse_document("<div").is_err());
}

#[test]
fn test_dump_tree_outline() {
    let tree = parse_html(r#"<div id="a"><p>Hi</p></div>"#);
    assert_eq!(dump_tree(&tree), "<div id=\"a\">\n  <p>\n    \"Hi\"\n");
}
