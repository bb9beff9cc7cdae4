//! CSS Computed Style
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//! "The computed value is the result of resolving the specified value..."
//!
//! Every node owns exactly one [`ComputedStyle`], kept in a [`StyleMap`]
//! indexed by [`NodeId`]. Values start at their initial values and are
//! overwritten in place by the cascade.

use serde::Serialize;
use strum_macros::{EnumString, IntoStaticStr};
use wren_dom::NodeId;

use super::values::{Color, DEFAULT_FONT_SIZE_PX};

/// [§ 2 'display'](https://www.w3.org/TR/css-display-3/#the-display-properties)
///
/// Only the three outer display types the layout engine implements.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    /// Stacks vertically and takes the full containing width.
    Block,
    /// Flows along the current line. The initial value.
    #[default]
    Inline,
    /// "The element and its descendants generate no boxes or text runs."
    None,
}

/// [§ 2 Choosing a positioning scheme](https://www.w3.org/TR/css-position-3/#position-property)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    /// Normal flow.
    #[default]
    Static,
    /// Normal flow, then nudged by the offsets at paint time.
    Relative,
    /// Out of flow, anchored to the containing block's padding box.
    Absolute,
    /// Out of flow, anchored to the viewport.
    Fixed,
}

/// [§ 4 'box-sizing'](https://www.w3.org/TR/css-sizing-3/#box-sizing)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
    /// `width` sets the content box; padding and border are added.
    #[default]
    ContentBox,
    /// `width` sets the border box.
    BorderBox,
}

/// [§ 16.2 'text-align'](https://www.w3.org/TR/CSS2/text.html#alignment-prop)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    /// Initial value.
    #[default]
    Left,
    /// Centered within the block.
    Center,
    /// Flush with the right edge of the block.
    Right,
    /// Accepted, painted like `left`.
    Justify,
}

/// [§ 2 'text-decoration-line'](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    /// No line.
    #[default]
    None,
    /// Line just below the baseline.
    Underline,
    /// Line through the middle of the ascent.
    LineThrough,
    /// Line along the top of the text.
    Overline,
}

/// [§ 3 'border-style'](https://www.w3.org/TR/css-backgrounds-3/#border-style)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// No border is drawn.
    None,
    /// Initial value here, so `border-width` alone draws a line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

/// [§ 11.2 'visibility'](https://www.w3.org/TR/CSS2/visufx.html#visibility)
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    EnumString,
    strum_macros::Display,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Initial value.
    #[default]
    Visible,
    /// Laid out but not drawn. `collapse` maps here as well.
    #[strum(serialize = "hidden", serialize = "collapse")]
    Hidden,
}

/// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineHeight {
    /// Resolved by the text measurer.
    #[default]
    Normal,
    /// A multiple of the element's own font size.
    Number(f32),
    /// A fixed length in pixels.
    Px(f32),
}

impl LineHeight {
    /// Used line height in pixels, given the font size and what the text
    /// measurer reports for `normal`.
    #[must_use]
    pub fn resolve(self, font_size: f32, normal: f32) -> f32 {
        match self {
            Self::Normal => normal,
            Self::Number(factor) => factor * font_size,
            Self::Px(px) => px,
        }
    }
}

/// The font a text run is measured and drawn with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    /// [§ 2.5 'font-size'](https://www.w3.org/TR/css-fonts-4/#font-size-prop), in pixels.
    pub size: f32,
    /// [§ 2.2 'font-weight'](https://www.w3.org/TR/css-fonts-4/#font-weight-prop), 100-900.
    pub weight: u16,
    /// [§ 2.4 'font-style'](https://www.w3.org/TR/css-fonts-4/#font-style-prop): italic or oblique.
    pub italic: bool,
    /// Mirrors `text-decoration: underline`, for surfaces with underlined fonts.
    pub underline: bool,
    /// [§ 2.1 'font-family'](https://www.w3.org/TR/css-fonts-4/#font-family-prop), first family only.
    pub family: String,
}

impl Font {
    /// Whether the weight is in the bold range.
    #[must_use]
    pub const fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE_PX,
            weight: 400,
            italic: false,
            underline: false,
            family: "Arial".to_string(),
        }
    }
}

/// Four physical sides, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Edges {
    /// Top side.
    pub top: f32,
    /// Right side.
    pub right: f32,
    /// Bottom side.
    pub bottom: f32,
    /// Left side.
    pub left: f32,
}

impl Edges {
    /// Edges from `[top, right, bottom, left]`.
    #[must_use]
    pub const fn from_array([top, right, bottom, left]: [f32; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Left plus right.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// [§ 3.1 Box insets](https://www.w3.org/TR/css-position-3/#insets)
///
/// `None` means the offset was never set; this is distinct from `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Offsets {
    /// `top`
    pub top: Option<f32>,
    /// `right`
    pub right: Option<f32>,
    /// `bottom`
    pub bottom: Option<f32>,
    /// `left`
    pub left: Option<f32>,
}

/// Computed styles for a node.
///
/// [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedStyle {
    /// [§ 3.1 'color'](https://www.w3.org/TR/css-color-4/#the-color-property)
    pub color: Color,
    /// [§ 3.2 'background-color'](https://www.w3.org/TR/css-backgrounds-3/#background-color)
    pub background_color: Color,
    /// Font properties.
    pub font: Font,

    /// [§ 10.2 'width'](https://www.w3.org/TR/CSS2/visudet.html#the-width-property), `None` for auto.
    pub width: Option<f32>,
    /// [§ 10.5 'height'](https://www.w3.org/TR/CSS2/visudet.html#the-height-property), `None` for auto.
    pub height: Option<f32>,
    /// [§ 6.1 Margins](https://www.w3.org/TR/css-box-4/#margins)
    pub margin: Edges,
    /// [§ 6.2 Padding](https://www.w3.org/TR/css-box-4/#paddings)
    pub padding: Edges,

    /// Border width, the same on every side.
    pub border_width: f32,
    /// Border color.
    pub border_color: Color,
    /// Border line style.
    pub border_style: BorderStyle,
    /// `box-sizing`
    pub box_sizing: BoxSizing,

    /// `display`
    pub display: Display,
    /// `position`
    pub position: Position,
    /// `top` / `right` / `bottom` / `left`
    pub offsets: Offsets,

    /// `text-align` (inherited)
    pub text_align: TextAlign,
    /// `text-decoration` (inherited here, unlike CSS)
    pub text_decoration: TextDecoration,
    /// `line-height` (inherited)
    pub line_height: LineHeight,
    /// `visibility` (inherited)
    pub visibility: Visibility,
    /// [§ 3.2 'opacity'](https://www.w3.org/TR/css-color-4/#transparency), in `[0, 1]`.
    pub opacity: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            background_color: Color::TRANSPARENT,
            font: Font::default(),
            width: None,
            height: None,
            margin: Edges::default(),
            padding: Edges::default(),
            border_width: 0.0,
            border_color: Color::BLACK,
            border_style: BorderStyle::default(),
            box_sizing: BoxSizing::default(),
            display: Display::default(),
            position: Position::default(),
            offsets: Offsets::default(),
            text_align: TextAlign::default(),
            text_decoration: TextDecoration::default(),
            line_height: LineHeight::default(),
            visibility: Visibility::default(),
            opacity: 1.0,
        }
    }
}

impl ComputedStyle {
    /// [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    ///
    /// Copy the inherited properties from the parent's resolved style:
    /// color, the font, line-height, text-align, visibility and
    /// text-decoration.
    pub fn inherit_from(&mut self, parent: &Self) {
        self.color = parent.color;
        self.font = parent.font.clone();
        self.line_height = parent.line_height;
        self.text_align = parent.text_align;
        self.visibility = parent.visibility;
        self.text_decoration = parent.text_decoration;
    }

    /// `display: none`.
    #[must_use]
    pub fn is_display_none(&self) -> bool {
        self.display == Display::None
    }

    /// Absolute or fixed.
    #[must_use]
    pub fn is_out_of_flow(&self) -> bool {
        matches!(self.position, Position::Absolute | Position::Fixed)
    }

    /// Whether `visibility` lets the box draw itself.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }
}

/// Computed styles for every node of a tree, indexed by [`NodeId`].
///
/// Missing entries read as the initial style.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    styles: Vec<ComputedStyle>,
}

impl StyleMap {
    /// A map of `len` initial styles.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            styles: vec![ComputedStyle::default(); len],
        }
    }

    /// Grow to at least `len` entries, filling with initial styles.
    pub fn ensure_len(&mut self, len: usize) {
        if self.styles.len() < len {
            self.styles.resize(len, ComputedStyle::default());
        }
    }

    /// Style of a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ComputedStyle> {
        self.styles.get(id.0)
    }

    /// Mutable style of a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ComputedStyle> {
        self.styles.get_mut(id.0)
    }

    /// A copy of the node's style, or the initial style.
    #[must_use]
    pub fn style_of(&self, id: NodeId) -> ComputedStyle {
        self.get(id).cloned().unwrap_or_default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
