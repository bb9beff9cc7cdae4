//! Common utilities for the Wren document engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - colored, deduplicated terminal output for unsupported input
//! - **URL Resolution** - joining relative references against a document base URL
//! - **Fetching** - blocking HTTP GET and `data:` URL decoding
//! - **Images** - the decoded image type shared by layout and painting

pub mod image;
pub mod net;
pub mod url;
pub mod warning;
