//! HTML tokenizer and parser for the Wren document engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer**: start tags with quoted attributes, end tags, and
//!   whitespace-normalized text. Doctypes and comments are skipped.
//! - **Tree Builder**: an explicit stack of open elements with void-element
//!   handling and an implicit `html > body` root for text outside any element.
//!
//! # Not Implemented
//!
//! - Character references
//! - Raw-text elements (`<script>` and `<style>` bodies are ordinary text)
//! - Insertion modes, implied end tags, the adoption agency algorithm

/// HTML parser and tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use parser::{VOID_ELEMENTS, dump_tree, parse, parse_document, print_tree};
pub use tokenizer::{Attributes, HtmlError, Token, tokenize};
