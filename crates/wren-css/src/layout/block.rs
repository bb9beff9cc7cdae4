//! Block layout.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."

use wren_dom::NodeId;

use super::layout_box::{BoxKind, LayoutBox};
use super::{LayoutContext, LineState, is_block_level, layout};
use crate::style::{BoxSizing, ComputedStyle, Position};

/// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
///
/// Border-box width of a block: the explicit width (plus padding and border
/// under `content-box`), or the containing width minus the horizontal
/// margins.
#[must_use]
pub fn used_width(style: &ComputedStyle, containing_width: f32) -> f32 {
    match style.width {
        Some(width) if style.box_sizing == BoxSizing::ContentBox => {
            width + style.padding.horizontal() + 2.0 * style.border_width
        }
        Some(width) => width,
        None => containing_width - style.margin.horizontal(),
    }
}

/// Lay out a block element. The returned box sits at `(0, 0)`.
///
/// STEP 1: Resolve the width and the content width.
///
/// STEP 2: Lay out the children against a fresh line seeded at the padding
/// box origin. Block children stack below each other; inline content shares
/// the line and pushes the content bottom down. Absolute and fixed children
/// go to the out-of-flow list.
///
/// STEP 3: Resolve the height, then anchor absolute children that hang off
/// the right or bottom edge.
#[must_use]
pub fn layout_block(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    tag: String,
    style: ComputedStyle,
    containing_width: f32,
) -> LayoutBox {
    // STEP 1
    let width = used_width(&style, containing_width);
    let content_width =
        (width - style.padding.horizontal() - 2.0 * style.border_width).max(0.0);
    let padding = style.padding;

    // STEP 2
    let mut line = LineState::new(padding.left, padding.top, content_width);
    let mut running_y = padding.top;
    let mut children = Vec::new();
    let mut out_of_flow = Vec::new();

    for &child in ctx.tree.children(node) {
        let child_style = ctx.styles.style_of(child);
        match child_style.position {
            // [§ 3.2 Absolute positioning](https://www.w3.org/TR/css-position-3/#abspos-insets)
            Position::Absolute => {
                let fresh = LineState::new(0.0, 0.0, content_width);
                let (mut positioned, _) = layout(ctx, child, content_width, fresh);
                let offsets = child_style.offsets;
                positioned.rect.x = offsets.left.map_or(padding.left, |left| padding.left + left);
                positioned.rect.y = offsets.top.map_or(padding.top, |top| padding.top + top);
                out_of_flow.push(positioned);
                continue;
            }
            // Resolved against the viewport at paint time.
            Position::Fixed => {
                let fresh = LineState::new(0.0, 0.0, content_width);
                let (mut positioned, _) = layout(ctx, child, content_width, fresh);
                positioned.rect.x = 0.0;
                positioned.rect.y = 0.0;
                out_of_flow.push(positioned);
                continue;
            }
            Position::Static | Position::Relative => {}
        }

        let block_child = is_block_level(ctx.tree, child, &child_style);
        let (mut child_box, next) = layout(ctx, child, content_width, line);
        if block_child {
            running_y = running_y.max(line.close().y);
            let margin = child_box.style.margin;
            child_box.rect.x = padding.left + margin.left;
            child_box.rect.y = running_y + margin.top;
            running_y += child_box.rect.height + margin.top + margin.bottom;
            line = line.below(running_y);
        } else {
            line = next;
            running_y = running_y.max(line.reach());
        }
        children.push(child_box);
    }

    // STEP 3
    let height = style.height.unwrap_or(running_y + padding.bottom);
    for positioned in &mut out_of_flow {
        if positioned.style.position != Position::Absolute {
            continue;
        }
        let offsets = positioned.style.offsets;
        if offsets.left.is_none()
            && let Some(right) = offsets.right
        {
            positioned.rect.x = width - padding.right - right - positioned.rect.width;
        }
        if offsets.top.is_none()
            && let Some(bottom) = offsets.bottom
        {
            positioned.rect.y = height - padding.bottom - bottom - positioned.rect.height;
        }
    }

    let mut block = LayoutBox::new(node, BoxKind::Element { tag }, style);
    block.rect.width = width;
    block.rect.height = height;
    block.children = children;
    block.out_of_flow = out_of_flow;
    block
}
