//! CSS parsing, cascade, layout and painting for the Wren document engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser**: `selector { declarations }` rules, declaration blocks and
//!   `style` attributes, with comments skipped between rules.
//! - **CSSOM**: an ordered rule list with type, class and ID selectors.
//! - **Cascade**: source-order application plus inheritance, inline styles
//!   last.
//! - **Layout**: block, inline, text and image boxes with absolute and fixed
//!   positioning ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)).
//! - **Paint**: a geometry walker that draws onto any [`DrawingSurface`],
//!   hit-tests points and finds link targets.
//!
//! # Not Implemented
//!
//! - Specificity, `!important`, combinators, pseudo-classes
//! - Relative units (em, rem, %), except `line-height` percentages
//! - Floats, flex, grid, tables, z-index

/// CSS cascade and style computation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// The CSS object model: ordered rules with pre-split selectors.
pub mod cssom;
/// Box layout per [CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Painting and hit-testing per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Computed style representation per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod style;
/// User-agent stylesheet per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod ua_stylesheet;

// Re-exports for convenience
pub use cascade::{apply_style, compute_styles};
pub use cssom::Cssom;
pub use layout::{
    ApproximateFontMetrics, BoxKind, BoxSummary, ImageService, LayoutBox, LayoutContext,
    LineState, NoImages, Rect, TextMeasurer, layout, layout_document,
};
pub use paint::{
    DisplayCommand, DisplayList, DrawingSurface, Viewport, bubble_for_link, content_width,
    find_node_at, paint,
};
pub use parser::{
    CssRule, Declaration, extract_stylesheets, parse_css, parse_inline_style,
    serialize_declarations,
};
pub use selector::Selector;
pub use style::{Color, ComputedStyle, Font, Property, StyleMap};
pub use ua_stylesheet::{USER_AGENT_CSS, user_agent_rules};
