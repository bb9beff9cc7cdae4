//! Inline layout: inline elements and text runs.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! Inline boxes share the line cursor of their block. An inline element's own
//! rectangle stays at `(0, 0)`, so the words below it keep the block's
//! coordinates.

use wren_dom::NodeId;

use super::layout_box::{BoxKind, LayoutBox, Rect};
use super::{LayoutContext, LineState, is_block_level, layout};
use crate::style::{ComputedStyle, Position};

/// Lay out an inline element.
///
/// STEP 1: Move the cursor right past the left margin and padding.
///
/// STEP 2: Lay out the children on the shared line. A block child closes the
/// line, sits on its own line, and the cursor continues below it.
///
/// STEP 3: Move the cursor right past the right padding and margin.
///
/// The width is the net cursor advance over the children, the height the
/// growth of the line's reach plus vertical padding.
#[must_use]
pub fn layout_inline(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    style: ComputedStyle,
    containing_width: f32,
    mut line: LineState,
) -> (LayoutBox, LineState) {
    let tag = ctx.tree.tag_name(node).unwrap_or_default().to_string();
    let start_reach = line.reach();

    // STEP 1
    line.x += style.margin.left + style.padding.left;
    let start_x = line.x;

    // STEP 2
    let mut children = Vec::new();
    let mut out_of_flow = Vec::new();
    for &child in ctx.tree.children(node) {
        let child_style = ctx.styles.style_of(child);
        if child_style.is_out_of_flow() {
            let fresh = LineState::new(0.0, 0.0, line.max_width);
            let (mut positioned, _) = layout(ctx, child, containing_width, fresh);
            if child_style.position == Position::Absolute {
                positioned.rect.x = child_style.offsets.left.unwrap_or(0.0);
                positioned.rect.y = child_style.offsets.top.unwrap_or(0.0);
            }
            out_of_flow.push(positioned);
            continue;
        }

        let block_child = is_block_level(ctx.tree, child, &child_style);
        let (mut child_box, next) = layout(ctx, child, containing_width, line);
        if block_child {
            let top = line.close().y;
            let margin = child_box.style.margin;
            child_box.rect.x = line.padding_left + margin.left;
            child_box.rect.y = top + margin.top;
            line = line.below(child_box.rect.bottom() + margin.bottom);
        } else {
            line = next;
        }
        children.push(child_box);
    }
    let width = (line.x - start_x).max(0.0);
    let height = (line.reach() - start_reach).max(0.0) + style.padding.vertical();

    // STEP 3
    line.x += style.padding.right + style.margin.right;

    let mut inline = LayoutBox::new(node, BoxKind::Element { tag }, style);
    inline.rect = Rect::new(0.0, 0.0, width, height);
    inline.children = children;
    inline.out_of_flow = out_of_flow;
    (inline, line)
}

/// [§ 5 Line Breaking](https://www.w3.org/TR/css-text-3/#line-breaking)
///
/// Lay out a text node word by word.
///
/// Each word is measured; if it would overflow the line and the line already
/// holds something, the line wraps first. The cursor then advances by the
/// word and one space. The line grows to the taller of the word and the used
/// `line-height`.
///
/// The text box is the bounding box of its words, and the word boxes are
/// relative to it.
#[must_use]
pub fn layout_text(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    style: ComputedStyle,
    text: &str,
    mut line: LineState,
) -> (LayoutBox, LineState) {
    let font = &style.font;
    let word_height = ctx.text.line_height(font);
    let used_line_height = style.line_height.resolve(font.size, word_height);
    let space = ctx.text.text_width(font, " ");

    let mut placed = Vec::new();
    for word in text.split_whitespace() {
        let width = ctx.text.text_width(font, word);
        if line.x + width > line.padding_left + line.max_width && !line.is_at_line_start() {
            line = line.wrap();
        }
        placed.push((word, Rect::new(line.x, line.y, width, word_height)));
        line.x += width + space;
        line.has_content = true;
        line.line_height = line.line_height.max(word_height).max(used_line_height);
    }

    let bounds = placed
        .iter()
        .map(|(_, rect)| *rect)
        .reduce(Rect::union)
        .unwrap_or_default();
    let words = placed
        .into_iter()
        .map(|(word, rect)| {
            let mut leaf = LayoutBox::new(node, BoxKind::Word(word.to_string()), style.clone());
            leaf.rect = rect.translate(-bounds.x, -bounds.y);
            leaf
        })
        .collect();

    let mut text_box = LayoutBox::new(node, BoxKind::Text, style);
    text_box.rect = bounds;
    text_box.children = words;
    (text_box, line)
}
