//! HTML tokenizer.
//!
//! A deliberately small relative of
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//! the whole input is scanned in one pass and split into start tags, end tags
//! and text. Character references, raw-text elements and unquoted attribute
//! values are not recognized.

/// Token types produced by the tokenizer.
pub mod token;

pub use token::{Attributes, Token};

use thiserror::Error;

/// Errors that abort tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HtmlError {
    /// A `<` was never closed by a `>`.
    #[error("malformed markup: tag opened at byte {offset} is never closed")]
    MalformedMarkup {
        /// Byte offset of the unterminated `<`.
        offset: usize,
    },
}

/// Collapse every whitespace run to one space and trim both ends.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a document into tokens.
///
/// STEP 1: `<!...>` (doctype, comments) is skipped up to the next `>`.
///
/// STEP 2: `</name>` becomes an end tag; any other `<...>` a start tag whose
/// name runs up to the first whitespace. The rest of the tag is the attribute
/// list.
///
/// STEP 3: Text up to the next `<` is whitespace-normalized and dropped when
/// nothing remains.
///
/// # Errors
///
/// Returns [`HtmlError::MalformedMarkup`] when a tag has no closing `>`.
pub fn tokenize(html: &str) -> Result<Vec<Token>, HtmlError> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < html.len() {
        let rest = &html[pos..];

        if !rest.starts_with('<') {
            // STEP 3: Text run.
            let end = rest.find('<').map_or(html.len(), |i| pos + i);
            let text = normalize_whitespace(&html[pos..end]);
            if !text.is_empty() {
                tokens.push(Token::Text(text));
            }
            pos = end;
            continue;
        }

        let Some(close) = rest.find('>') else {
            return Err(HtmlError::MalformedMarkup { offset: pos });
        };
        let inner = &rest[1..close];
        pos += close + 1;

        // STEP 1: Markup declarations.
        if inner.starts_with('!') {
            continue;
        }

        // STEP 2: Tags.
        if let Some(name) = inner.strip_prefix('/') {
            tokens.push(Token::EndTag {
                name: name.trim().to_ascii_lowercase(),
            });
        } else {
            let (name, attribute_text) = inner
                .split_once(char::is_whitespace)
                .unwrap_or((inner, ""));
            // `<br/>` carries the slash on the name itself.
            let name = name.strip_suffix('/').unwrap_or(name);
            tokens.push(Token::StartTag {
                name: name.to_ascii_lowercase(),
                attributes: parse_attributes(attribute_text),
            });
        }
    }

    Ok(tokens)
}

/// Parse the attribute part of a start tag, `name="value"` pairs.
///
/// The quote character is whichever character follows the `=`, so both
/// `'` and `"` work. Attributes with an empty value are dropped, and parsing
/// stops at the first name without an `=` (valueless attributes, the
/// self-closing `/`).
#[must_use]
pub fn parse_attributes(text: &str) -> Attributes {
    let mut attributes = Attributes::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start();
        let Some((name, after)) = rest.split_once('=') else {
            break;
        };
        let name = name.trim().to_ascii_lowercase();
        let after = after.trim_start();

        let mut chars = after.chars();
        let Some(quote) = chars.next() else {
            break;
        };
        let body = chars.as_str();
        let (value, remainder) = body.split_once(quote).unwrap_or((body, ""));
        rest = remainder;

        if !name.is_empty() && !value.is_empty() {
            let _ = attributes.insert(name, value.to_string());
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn test_attributes_accept_either_quote() {
        let attrs = parse_attributes(r#"class="a b" id='x'"#);
        assert_eq!(attrs.get("class").map(String::as_str), Some("a b"));
        assert_eq!(attrs.get("id").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_attributes_with_empty_value_are_dropped() {
        let attrs = parse_attributes(r#"alt="" src="a.png""#);
        assert_eq!(attrs.len(), 1);
        assert!(attrs.contains_key("src"));
    }

    #[test]
    fn test_attributes_stop_at_valueless_name() {
        let attrs = parse_attributes(r#"src="a.png" /"#);
        assert_eq!(attrs.len(), 1);
    }
}
