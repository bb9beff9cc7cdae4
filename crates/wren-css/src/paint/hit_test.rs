//! Hit-testing, link lookup and content extents.

use std::collections::VecDeque;

use wren_dom::{DomTree, NodeId};

use super::relative_offset;
use crate::layout::LayoutBox;
use crate::style::Position;

/// The deepest node whose box contains `(x, y)`, in document coordinates.
///
/// Children are tried before their parent (in-flow first, then absolute
/// children; fixed boxes are skipped), because an inline parent's own
/// rectangle sits at its origin while its words are elsewhere. Edges are
/// inclusive. `display: none` and empty boxes never hit.
#[must_use]
pub fn find_node_at(root: &LayoutBox, x: f32, y: f32) -> Option<NodeId> {
    find_in_box(root, x, y, 0.0, 0.0)
}

fn find_in_box(
    layout_box: &LayoutBox,
    x: f32,
    y: f32,
    origin_x: f32,
    origin_y: f32,
) -> Option<NodeId> {
    if layout_box.is_empty() || layout_box.style.is_display_none() {
        return None;
    }
    let (dx, dy) = relative_offset(&layout_box.style);
    let rect = layout_box.rect.translate(origin_x + dx, origin_y + dy);

    layout_box
        .children
        .iter()
        .chain(
            layout_box
                .out_of_flow
                .iter()
                .filter(|child| child.style.position != Position::Fixed),
        )
        .find_map(|child| find_in_box(child, x, y, rect.x, rect.y))
        .or_else(|| rect.contains(x, y).then_some(layout_box.node))
}

/// The `href` of the nearest `<a>` at or above `node`.
///
/// Anchors without an `href`, or with an empty one, are skipped.
#[must_use]
pub fn bubble_for_link(tree: &DomTree, node: NodeId) -> Option<String> {
    tree.inclusive_ancestors(node)
        .filter(|&id| tree.tag_name(id) == Some("a"))
        .find_map(|id| tree.get_attribute(id, "href").filter(|href| !href.is_empty()))
        .map(str::to_string)
}

/// Right-most edge of any in-flow box, measured from the root's left edge.
///
/// Hosts use it to size a horizontal scroll area.
#[must_use]
pub fn content_width(root: &LayoutBox) -> f32 {
    let mut max_right = root.rect.right();
    let mut queue = VecDeque::from([(root, 0.0_f32)]);
    while let Some((layout_box, parent_x)) = queue.pop_front() {
        let x = parent_x + layout_box.rect.x;
        max_right = max_right.max(x + layout_box.rect.width);
        queue.extend(layout_box.children.iter().map(|child| (child, x)));
    }
    max_right - root.rect.x
}
