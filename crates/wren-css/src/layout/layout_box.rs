//! Layout boxes and rectangles.

use std::rc::Rc;

use serde::Serialize;
use wren_common::image::LoadedImage;
use wren_dom::NodeId;

use crate::style::{ComputedStyle, Display};

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// Coordinates are relative to the parent box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside, edges included.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// What generated a [`LayoutBox`].
#[derive(Debug, Clone)]
pub enum BoxKind {
    /// A block or inline element.
    Element {
        /// Lower-case tag name.
        tag: String,
    },
    /// A text node; its children are [`BoxKind::Word`] leaves.
    Text,
    /// One word of a text node. The only kind that paints text.
    Word(String),
    /// [§ 4.2 Replaced elements](https://html.spec.whatwg.org/multipage/rendering.html#replaced-elements)
    ///
    /// An `<img>`. `None` while the image is unavailable.
    Image(Option<Rc<LoadedImage>>),
    /// `display: none` or whitespace-only text. Never painted or hit.
    Empty,
}

/// A node in the layout tree.
///
/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
///
/// "Each box is associated with its generating element."
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// The DOM node that generated this box.
    pub node: NodeId,
    /// What kind of box this is.
    pub kind: BoxKind,
    /// Computed style of the generating node.
    pub style: ComputedStyle,
    /// Border box, relative to the parent box.
    pub rect: Rect,
    /// In-flow children, in document order.
    pub children: Vec<LayoutBox>,
    /// Absolutely and fixed positioned descendants pulled out of the flow.
    pub out_of_flow: Vec<LayoutBox>,
}

impl LayoutBox {
    /// A box with an empty rectangle and no children.
    #[must_use]
    pub const fn new(node: NodeId, kind: BoxKind, style: ComputedStyle) -> Self {
        Self {
            node,
            kind,
            style,
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            children: Vec::new(),
            out_of_flow: Vec::new(),
        }
    }

    /// A box that takes no space and is never painted.
    #[must_use]
    pub const fn empty(node: NodeId, style: ComputedStyle) -> Self {
        Self::new(node, BoxKind::Empty, style)
    }

    /// Whether this is an [`BoxKind::Empty`] box.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.kind, BoxKind::Empty)
    }

    /// Tag name for element and image boxes.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            BoxKind::Element { tag } => Some(tag),
            BoxKind::Image(_) => Some("img"),
            _ => None,
        }
    }

    /// Whether this is a block-level element box.
    #[must_use]
    pub fn is_block(&self) -> bool {
        matches!(self.kind, BoxKind::Element { .. }) && self.style.display == Display::Block
    }

    /// A serializable outline of this box and its descendants.
    #[must_use]
    pub fn summary(&self) -> BoxSummary {
        let (kind, label) = match &self.kind {
            BoxKind::Element { tag } => ("element", Some(tag.clone())),
            BoxKind::Text => ("text", None),
            BoxKind::Word(word) => ("word", Some(word.clone())),
            BoxKind::Image(Some(image)) => (
                "image",
                Some(format!("{}x{}", image.width(), image.height())),
            ),
            BoxKind::Image(None) => ("image", None),
            BoxKind::Empty => ("empty", None),
        };
        BoxSummary {
            node: self.node.0,
            kind,
            label,
            rect: self.rect,
            children: self.children.iter().map(Self::summary).collect(),
            out_of_flow: self.out_of_flow.iter().map(Self::summary).collect(),
        }
    }
}

/// JSON view of a [`LayoutBox`], without styles or pixel data.
#[derive(Debug, Clone, Serialize)]
pub struct BoxSummary {
    /// Index of the generating node.
    pub node: usize,
    /// `element`, `text`, `word`, `image` or `empty`.
    pub kind: &'static str,
    /// Tag name, word text or image size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Rectangle relative to the parent.
    pub rect: Rect,
    /// In-flow children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxSummary>,
    /// Out-of-flow children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub out_of_flow: Vec<BoxSummary>,
}
