//! CSS Layout Engine
//!
//! Turns a styled DOM into a tree of positioned [`LayoutBox`]es.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS Positioned Layout Module Level 3](https://www.w3.org/TR/css-position-3/)
//!
//! # Module Structure
//!
//! - [`layout_box`] - Layout boxes and rectangles
//! - [`metrics`] - Text measurement and image services
//! - [`block`] - Block layout and out-of-flow anchoring
//! - [`inline`] - Inline elements and text runs
//! - [`replaced`] - Images
//!
//! The line cursor ([`LineState`]) is a plain value: each layout function
//! takes the cursor it starts from and returns the cursor it leaves behind.

pub mod block;
pub mod inline;
pub mod layout_box;
pub mod metrics;
pub mod replaced;

pub use layout_box::{BoxKind, BoxSummary, LayoutBox, Rect};
pub use metrics::{ApproximateFontMetrics, ImageService, NoImages, TextMeasurer};

use wren_dom::{DomTree, NodeId, NodeType};

use crate::style::{ComputedStyle, Display, StyleMap};

/// Everything layout reads but never changes.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// The document.
    pub tree: &'a DomTree,
    /// Resolved styles for `tree`.
    pub styles: &'a StyleMap,
    /// Base for resolving relative `src` attributes.
    pub base_url: Option<&'a str>,
    /// Text measurement.
    pub text: &'a dyn TextMeasurer,
    /// Image loading.
    pub images: &'a dyn ImageService,
}

/// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
///
/// The line cursor of the innermost block, in that block's coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LineState {
    /// Where the next inline content starts.
    pub x: f32,
    /// Top of the current line.
    pub y: f32,
    /// Height of the current line so far.
    pub line_height: f32,
    /// Width available to a line.
    pub max_width: f32,
    /// Left edge lines start at.
    pub padding_left: f32,
    /// Whether a word sits on the current line. Inline margins and padding
    /// move `x` without setting this.
    pub has_content: bool,
}

impl LineState {
    /// An empty line at `(padding_left, top)`.
    #[must_use]
    pub const fn new(padding_left: f32, top: f32, max_width: f32) -> Self {
        Self {
            x: padding_left,
            y: top,
            line_height: 0.0,
            max_width,
            padding_left,
            has_content: false,
        }
    }

    /// Whether nothing has been placed on the current line.
    #[must_use]
    pub const fn is_at_line_start(&self) -> bool {
        !self.has_content
    }

    /// Lowest point the current line reaches.
    #[must_use]
    pub fn reach(&self) -> f32 {
        self.y + self.line_height
    }

    /// Start a new line below the current one.
    #[must_use]
    pub fn wrap(self) -> Self {
        Self {
            x: self.padding_left,
            y: self.reach(),
            line_height: 0.0,
            has_content: false,
            ..self
        }
    }

    /// Wrap if the current line holds anything.
    #[must_use]
    pub fn close(self) -> Self {
        if self.is_at_line_start() && self.line_height <= 0.0 {
            self
        } else {
            self.wrap()
        }
    }

    /// An empty line starting at `top`.
    #[must_use]
    pub const fn below(self, top: f32) -> Self {
        Self {
            x: self.padding_left,
            y: top,
            line_height: 0.0,
            has_content: false,
            ..self
        }
    }
}

/// Whether `node` generates a block box in normal flow.
pub(crate) fn is_block_level(tree: &DomTree, node: NodeId, style: &ComputedStyle) -> bool {
    style.display == Display::Block && tree.tag_name(node).is_some_and(|tag| tag != "img")
}

/// Lay out `node` and its subtree.
///
/// Dispatch: `display: none` gives an empty box and leaves the cursor alone;
/// `<img>` is replaced content; whitespace-only text is an empty box and
/// other text is split into words; remaining elements are block or inline by
/// their `display`.
///
/// Block boxes come back at `(0, 0)`; placing them is the parent's job.
#[must_use]
pub fn layout(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    containing_width: f32,
    line: LineState,
) -> (LayoutBox, LineState) {
    let style = ctx.styles.style_of(node);
    if style.is_display_none() {
        return (LayoutBox::empty(node, style), line);
    }
    let Some(dom_node) = ctx.tree.get(node) else {
        return (LayoutBox::empty(node, style), line);
    };

    match &dom_node.node_type {
        NodeType::Text(text) if text.trim().is_empty() => (LayoutBox::empty(node, style), line),
        NodeType::Text(text) => inline::layout_text(ctx, node, style, text, line),
        NodeType::Element(element) if element.tag_name == "img" => {
            replaced::layout_image(ctx, node, style, element, line)
        }
        NodeType::Element(element) => {
            if style.display == Display::Block {
                let tag = element.tag_name.clone();
                (block::layout_block(ctx, node, tag, style, containing_width), line)
            } else {
                inline::layout_inline(ctx, node, style, containing_width, line)
            }
        }
    }
}

/// Lay out the whole document for a viewport `viewport_width` wide.
///
/// The root is offset by its own top and left margins. `None` for a tree
/// without a root.
#[must_use]
pub fn layout_document(ctx: &LayoutContext<'_>, viewport_width: f32) -> Option<LayoutBox> {
    let root = ctx.tree.root()?;
    let line = LineState::new(0.0, 0.0, viewport_width);
    let (mut root_box, _) = layout(ctx, root, viewport_width, line);
    if root_box.is_block() {
        root_box.rect.x = root_box.style.margin.left;
        root_box.rect.y = root_box.style.margin.top;
    }
    Some(root_box)
}
