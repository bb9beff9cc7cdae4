//! CSS parser.
//!
//! Splits a stylesheet into `selector { declarations }` rules and parses
//! declaration blocks (and `style` attributes) with a single-pass state
//! machine. There is no tokenizer: at-rules, nesting and escapes are not
//! understood.

use std::collections::VecDeque;
use std::fmt::Write as _;

use serde::Serialize;
use wren_dom::DomTree;

/// [§ 5.4.4 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A `property: value` pair. Both are lower-cased outside quoted and
/// parenthesized spans, and the value is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Property name, whitespace removed.
    pub property: String,
    /// Property value.
    pub value: String,
}

impl Declaration {
    /// Create a declaration.
    #[must_use]
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A style rule: the raw selector text (possibly a comma-separated group)
/// and its declarations in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssRule {
    /// Selector text, trimmed but otherwise untouched.
    pub selector: String,
    /// Declarations of the block.
    pub declarations: Vec<Declaration>,
}

/// Parse a stylesheet into rules, in source order.
///
/// STEP 1: Skip whitespace, `/* ... */` and `// ...` (to end of line) at the
/// start of each rule.
///
/// STEP 2: The text before the next `{` is the selector, the text up to the
/// following `}` the declaration block.
///
/// STEP 3: A `}` without a preceding `{` is skipped. A `{` that is never
/// closed takes the rest of the input as its block and ends parsing.
#[must_use]
pub fn parse_css(css: &str) -> Vec<CssRule> {
    let mut rules = Vec::new();
    let mut rest = css;

    loop {
        // STEP 1
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map_or("", |(_, tail)| tail);
            continue;
        }
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map_or("", |(_, tail)| tail);
            continue;
        }

        let open = rest.find('{');
        let close = rest.find('}');
        match (open, close) {
            // STEP 2
            (Some(open), close) if close.is_none_or(|close| close > open) => {
                let selector = rest[..open].trim().to_string();
                let block = close.map_or(&rest[open + 1..], |close| &rest[open + 1..close]);
                rules.push(CssRule {
                    selector,
                    declarations: parse_inline_style(block),
                });
                match close {
                    Some(close) => rest = &rest[close + 1..],
                    None => break,
                }
            }
            // STEP 3
            (_, Some(close)) => rest = &rest[close + 1..],
            (Some(_), None) | (None, None) => break,
        }
    }

    rules
}

/// Parse a declaration list such as a `style` attribute.
///
/// - The name runs up to the first `:`; whitespace inside it is dropped.
/// - A `;` ends the declaration only outside parentheses and quotes, so
///   `url(a;b)` and `'x;y'` stay intact.
/// - Text is lower-cased except inside parentheses and quotes.
/// - Declarations with an empty name or value are discarded.
///
/// A property given twice keeps its first position and its last value.
#[must_use]
pub fn parse_inline_style(text: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut name = String::new();
    let mut value = String::new();
    let mut in_value = false;
    let mut paren_depth = 0_i32;
    let mut in_quote = false;

    for c in text.chars() {
        if c == ':' && !in_value {
            in_value = true;
        } else if c == ';' && paren_depth == 0 && !in_quote {
            push_declaration(&mut declarations, &name, &value);
            name.clear();
            value.clear();
            in_value = false;
        } else if !in_value {
            if !c.is_whitespace() {
                name.extend(c.to_lowercase());
            }
        } else {
            match c {
                '(' => paren_depth += 1,
                ')' => paren_depth -= 1,
                '"' | '\'' => in_quote = !in_quote,
                _ => {}
            }
            if paren_depth > 0 || in_quote {
                value.push(c);
            } else {
                value.extend(c.to_lowercase());
            }
        }
    }
    push_declaration(&mut declarations, &name, &value);

    declarations
}

fn push_declaration(declarations: &mut Vec<Declaration>, name: &str, value: &str) {
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return;
    }
    if let Some(existing) = declarations.iter_mut().find(|d| d.property == name) {
        existing.value = value.to_string();
    } else {
        declarations.push(Declaration::new(name, value));
    }
}

/// Render declarations back to `name: value` text joined by `; `.
///
/// Parsing the result yields the same declarations again. Only the last
/// value can hold an unclosed quote or parenthesis, so no `;` follows it.
#[must_use]
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    let mut out = String::new();
    for (i, decl) in declarations.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{}: {}", decl.property, decl.value);
    }
    out
}

/// [§ 4.2.6 The style element](https://html.spec.whatwg.org/multipage/semantics.html#the-style-element)
///
/// Concatenate the text of every `<style>` element, breadth-first, each
/// followed by a newline.
#[must_use]
pub fn extract_stylesheets(tree: &DomTree) -> String {
    let mut css = String::new();
    let mut queue: VecDeque<_> = tree.root().into_iter().collect();

    while let Some(id) = queue.pop_front() {
        if tree.tag_name(id) == Some("style") {
            for &child in tree.children(id) {
                if let Some(text) = tree.as_text(child) {
                    css.push_str(text);
                }
            }
            css.push('\n');
        }
        queue.extend(tree.children(id).iter().copied());
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(decls: &[Declaration]) -> Vec<(&str, &str)> {
        decls
            .iter()
            .map(|d| (d.property.as_str(), d.value.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_declarations_are_skipped() {
        let decls = parse_inline_style("color:red;;;font-weight:bold;");
        assert_eq!(pairs(&decls), vec![("color", "red"), ("font-weight", "bold")]);
    }

    #[test]
    fn test_missing_name_is_dropped() {
        let decls = parse_inline_style(":red; color:blue;");
        assert_eq!(pairs(&decls), vec![("color", "blue")]);
    }

    #[test]
    fn test_missing_colon_swallows_declaration() {
        let decls = parse_inline_style("color red; font-size:12px;");
        assert_eq!(pairs(&decls), vec![("font-size", "12px")]);
    }

    #[test]
    fn test_names_and_values_are_lower_cased() {
        let decls = parse_inline_style("COLOR:RED; Font-Size:12Px;");
        assert_eq!(pairs(&decls), vec![("color", "red"), ("font-size", "12px")]);
    }

    #[test]
    fn test_semicolon_inside_parens_does_not_split() {
        let decls = parse_inline_style("background-image: url(http://a.com/B;c.png)");
        assert_eq!(
            pairs(&decls),
            vec![("background-image", "url(http://a.com/B;c.png)")]
        );
    }

    #[test]
    fn test_semicolon_inside_quotes_does_not_split() {
        let decls = parse_inline_style("list-style: url('data:image/png;base64,123')");
        assert_eq!(
            pairs(&decls),
            vec![("list-style", "url('data:image/png;base64,123')")]
        );
    }

    #[test]
    fn test_repeated_property_keeps_first_position_last_value() {
        let decls = parse_inline_style("color: red; margin: 0; color: blue");
        assert_eq!(pairs(&decls), vec![("color", "blue"), ("margin", "0")]);
    }

    #[test]
    fn test_parse_css_rules_in_order() {
        let rules = parse_css("p { color: red; } .a, #b { margin: 0 }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector, "p");
        assert_eq!(rules[1].selector, ".a, #b");
        assert_eq!(pairs(&rules[1].declarations), vec![("margin", "0")]);
    }

    #[test]
    fn test_parse_css_skips_comments() {
        let rules = parse_css("/* head */ p { color: red; }\n// line\ndiv { color: blue; }");
        let selectors: Vec<_> = rules.iter().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["p", "div"]);
    }

    #[test]
    fn test_stray_close_brace_is_skipped() {
        let rules = parse_css("} p { color: red; }");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector, "p");
    }

    #[test]
    fn test_unterminated_block_takes_rest() {
        let rules = parse_css("p { color: red; } div { color: blue; margin: 1px");
        assert_eq!(rules.len(), 2);
        assert_eq!(
            pairs(&rules[1].declarations),
            vec![("color", "blue"), ("margin", "1px")]
        );
    }

    #[test]
    fn test_serialize_round_trip() {
        let decls = parse_inline_style("Color: Red; background: url(A;B)");
        let text = serialize_declarations(&decls);
        assert_eq!(text, "color: red; background: url(A;B)");
        assert_eq!(parse_inline_style(&text), decls);
    }

    #[test]
    fn test_serialize_keeps_unclosed_value_last() {
        let decls = parse_inline_style("font-family: 'open sans");
        assert_eq!(pairs(&decls), vec![("font-family", "'open sans")]);
        let text = serialize_declarations(&decls);
        assert_eq!(text, "font-family: 'open sans");
        assert_eq!(parse_inline_style(&text), decls);

        let decls = parse_inline_style("color: red); margin: 0");
        assert_eq!(pairs(&decls), vec![("color", "red); margin: 0")]);
        assert_eq!(parse_inline_style(&serialize_declarations(&decls)), decls);
    }

    #[test]
    fn test_parse_css_with_open_brace_only() {
        let rules = parse_css("p { color: red");
        assert_eq!(rules.len(), 1);
        assert_eq!(pairs(&rules[0].declarations), vec![("color", "red")]);
    }
}
