//! Geometry walker: painting, hit-testing and link lookup.
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! ```text
//! Style → Layout → Paint → DrawingSurface
//!                    ↓
//!              DisplayList (record / replay)
//! ```

mod display_list;
mod hit_test;
mod painter;
mod surface;

pub use display_list::{DisplayCommand, DisplayList};
pub use hit_test::{bubble_for_link, content_width, find_node_at};
pub use painter::{Viewport, paint};
pub use surface::DrawingSurface;

use crate::style::{ComputedStyle, Position};

/// [§ 3.4 Relative positioning](https://www.w3.org/TR/css-position-3/#relpos-insets)
///
/// Visual nudge of a `position: relative` box: `(left - right, top - bottom)`
/// with unset offsets counting as zero. Other boxes are not moved.
pub(crate) fn relative_offset(style: &ComputedStyle) -> (f32, f32) {
    if style.position != Position::Relative {
        return (0.0, 0.0);
    }
    let offsets = style.offsets;
    (
        offsets.left.unwrap_or(0.0) - offsets.right.unwrap_or(0.0),
        offsets.top.unwrap_or(0.0) - offsets.bottom.unwrap_or(0.0),
    )
}
