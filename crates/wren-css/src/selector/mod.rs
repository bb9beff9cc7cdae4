//! Simple selectors.
//!
//! Only the three simple selectors of
//! [Selectors Level 4 § 5](https://www.w3.org/TR/selectors-4/#elemental-selectors)
//! are understood: type, class and ID. Groups are split on `,` by the CSSOM
//! before they get here; combinators and pseudo-classes never match.

use wren_dom::{DomTree, NodeId};

/// One sub-selector of a selector group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// [§ 6.6 Class selectors](https://www.w3.org/TR/selectors-4/#class-html)
    ///
    /// `.name`: matches when the element's `class` list contains `name`.
    Class(String),
    /// [§ 6.7 ID selectors](https://www.w3.org/TR/selectors-4/#id-selectors)
    ///
    /// `#name`: matches when the element's `id` equals `name`.
    Id(String),
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Matches when the tag name is exactly equal.
    Tag(String),
}

impl Selector {
    /// Classify a sub-selector by its first character.
    ///
    /// Returns `None` for empty text, which never matches.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(if let Some(class) = text.strip_prefix('.') {
            Self::Class(class.to_string())
        } else if let Some(id) = text.strip_prefix('#') {
            Self::Id(id.to_string())
        } else {
            Self::Tag(text.to_string())
        })
    }

    /// Split a selector group into its sub-selectors.
    ///
    /// All whitespace is removed first, so `"h1, h2"` and `"h1,h2"` are the
    /// same group. Empty members are dropped.
    #[must_use]
    pub fn parse_group(text: &str) -> Vec<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        compact.split(',').filter_map(Self::parse).collect()
    }

    /// Whether `node` matches. Text nodes never do.
    #[must_use]
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.as_element(node) else {
            return false;
        };
        match self {
            Self::Class(class) => element.has_class(class),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Tag(tag) => element.tag_name == *tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_by_prefix() {
        assert_eq!(Selector::parse(".a"), Some(Selector::Class("a".into())));
        assert_eq!(Selector::parse("#b"), Some(Selector::Id("b".into())));
        assert_eq!(Selector::parse("p"), Some(Selector::Tag("p".into())));
        assert_eq!(Selector::parse(""), None);
    }

    #[test]
    fn test_group_strips_whitespace_and_empty_members() {
        assert_eq!(
            Selector::parse_group(" h1 ,\n h2 ,, "),
            vec![Selector::Tag("h1".into()), Selector::Tag("h2".into())]
        );
    }

    #[test]
    fn test_descendant_selector_collapses_to_a_tag_that_never_matches() {
        // "div p" becomes the tag "divp".
        assert_eq!(
            Selector::parse_group("div p"),
            vec![Selector::Tag("divp".into())]
        );
    }
}
