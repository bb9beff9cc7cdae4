use std::collections::BTreeMap;

use strum_macros::{Display, IntoStaticStr};

/// Attributes of a start tag, keyed by name.
///
/// Ordered so that token dumps are stable.
pub type Attributes = BTreeMap<String, String>;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer emits tokens of these types to the tree construction stage.
/// DOCTYPEs and comments never reach the tree builder; they are skipped
/// during tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Token {
    /// An opening tag such as `<a href="x">`.
    StartTag {
        /// Lower-cased tag name.
        name: String,
        /// Attributes with non-empty values.
        attributes: Attributes,
    },

    /// A closing tag such as `</a>`.
    EndTag {
        /// Lower-cased tag name.
        name: String,
    },

    /// A run of text between tags, whitespace-normalized and never empty.
    Text(String),
}

impl Token {
    /// Convenience constructor for a start tag without attributes.
    #[must_use]
    pub fn start(name: &str) -> Self {
        Self::StartTag {
            name: name.to_string(),
            attributes: Attributes::new(),
        }
    }

    /// Convenience constructor for an end tag.
    #[must_use]
    pub fn end(name: &str) -> Self {
        Self::EndTag {
            name: name.to_string(),
        }
    }

    /// Convenience constructor for a text token.
    #[must_use]
    pub fn text(data: &str) -> Self {
        Self::Text(data.to_string())
    }
}
