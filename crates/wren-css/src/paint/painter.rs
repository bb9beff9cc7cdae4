//! Painter - walks the layout tree and draws it.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! Depth first, in-flow children before out-of-flow ones. Box rectangles are
//! relative to their parent, so the walker carries the absolute origin down.

use super::relative_offset;
use super::surface::DrawingSurface;
use crate::layout::{BoxKind, LayoutBox, Rect, TextMeasurer};
use crate::style::{BorderStyle, Position, TextAlign, TextDecoration};

/// Horizontal offset of text inside a list item, after the bullet.
const BULLET_INDENT: f32 = 15.0;

/// The visible part of the document.
///
/// Fixed boxes are positioned against it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Visible width.
    pub width: f32,
    /// Visible height.
    pub height: f32,
    /// Horizontal scroll offset.
    pub scroll_x: f32,
    /// Vertical scroll offset.
    pub scroll_y: f32,
}

impl Viewport {
    /// An unscrolled viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// What a box needs to know about its ancestors while painting.
#[derive(Debug, Clone, Copy)]
struct Containing<'a> {
    /// Width of the nearest block ancestor, for `text-align`.
    block_width: f32,
    /// Tag of the parent box.
    parent_tag: Option<&'a str>,
}

/// Paint `root` onto `surface`.
pub fn paint(
    root: &LayoutBox,
    surface: &mut dyn DrawingSurface,
    metrics: &dyn TextMeasurer,
    viewport: Viewport,
) {
    let mut painter = Painter {
        surface,
        metrics,
        viewport,
    };
    let containing = Containing {
        block_width: root.rect.width,
        parent_tag: None,
    };
    painter.paint_box(root, 0.0, 0.0, containing);
}

struct Painter<'s, 'm> {
    surface: &'s mut dyn DrawingSurface,
    metrics: &'m dyn TextMeasurer,
    viewport: Viewport,
}

impl Painter<'_, '_> {
    /// Paint a box whose parent sits at `(origin_x, origin_y)`.
    fn paint_box(
        &mut self,
        layout_box: &LayoutBox,
        origin_x: f32,
        origin_y: f32,
        containing: Containing<'_>,
    ) {
        if layout_box.is_empty() || layout_box.style.is_display_none() {
            return;
        }
        let (dx, dy) = relative_offset(&layout_box.style);
        let x = origin_x + layout_box.rect.x + dx;
        let y = origin_y + layout_box.rect.y + dy;
        self.with_opacity(layout_box.style.opacity, |painter| {
            painter.paint_contents(layout_box, x, y, containing);
        });
    }

    /// [§ 3.6 Fixed positioning](https://www.w3.org/TR/css-position-3/#fixed-pos)
    ///
    /// Place a fixed box against the viewport: left, else right, else the
    /// scroll edge; top, else bottom, else the scroll edge.
    fn paint_fixed(&mut self, layout_box: &LayoutBox) {
        if layout_box.is_empty() || layout_box.style.is_display_none() {
            return;
        }
        let offsets = layout_box.style.offsets;
        let Viewport {
            width,
            height,
            scroll_x,
            scroll_y,
        } = self.viewport;
        let x = match (offsets.left, offsets.right) {
            (Some(left), _) => scroll_x + left,
            (None, Some(right)) => scroll_x + width - layout_box.rect.width - right,
            (None, None) => scroll_x,
        };
        let y = match (offsets.top, offsets.bottom) {
            (Some(top), _) => scroll_y + top,
            (None, Some(bottom)) => scroll_y + height - layout_box.rect.height - bottom,
            (None, None) => scroll_y,
        };
        let containing = Containing {
            block_width: layout_box.rect.width,
            parent_tag: None,
        };
        self.with_opacity(layout_box.style.opacity, |painter| {
            painter.paint_contents(layout_box, x, y, containing);
        });
    }

    /// Multiply the surface opacity for the duration of `paint`.
    fn with_opacity(&mut self, opacity: f32, paint: impl FnOnce(&mut Self)) {
        let previous = self.surface.opacity();
        self.surface.set_opacity(previous * opacity);
        paint(self);
        self.surface.set_opacity(previous);
    }

    /// Paint a box already placed at `(x, y)`, then its descendants.
    fn paint_contents(
        &mut self,
        layout_box: &LayoutBox,
        x: f32,
        y: f32,
        containing: Containing<'_>,
    ) {
        let style = &layout_box.style;
        let rect = Rect::new(x, y, layout_box.rect.width, layout_box.rect.height);

        match &layout_box.kind {
            // [Appendix E.2 Step 5] "the replaced content of replaced inline-level elements"
            BoxKind::Image(image) => {
                if let Some(image) = image
                    && style.is_visible()
                {
                    self.surface.draw_image(rect, image);
                }
                return;
            }
            BoxKind::Text => {
                self.paint_text(layout_box, x, y, containing);
                return;
            }
            BoxKind::Element { .. } if style.is_visible() => {
                // [Appendix E.2 Step 2] "the background color of the element"
                if !style.background_color.is_transparent() {
                    self.surface.fill_rect(rect, style.background_color);
                }
                // "the border of the element"
                if style.border_width > 0.0 && style.border_style != BorderStyle::None {
                    self.surface.stroke_rect(
                        rect,
                        style.border_width,
                        style.border_color,
                        style.border_style,
                    );
                }
            }
            BoxKind::Element { .. } | BoxKind::Word(_) | BoxKind::Empty => {}
        }

        let inner = Containing {
            block_width: if layout_box.is_block() {
                layout_box.rect.width
            } else {
                containing.block_width
            },
            parent_tag: layout_box.tag(),
        };
        for child in &layout_box.children {
            self.paint_box(child, x, y, inner);
        }
        for child in &layout_box.out_of_flow {
            if child.style.position == Position::Fixed {
                self.paint_fixed(child);
            } else {
                self.paint_box(child, x, y, inner);
            }
        }
    }

    /// [Appendix E.2 Step 7] "the element's text"
    ///
    /// Words are drawn on their baselines, shifted for `text-align` against
    /// the nearest block's width. Text directly inside an `<li>` gets a
    /// bullet.
    fn paint_text(&mut self, text_box: &LayoutBox, x: f32, y: f32, containing: Containing<'_>) {
        let style = &text_box.style;
        if !style.is_visible() {
            return;
        }
        let ascent = self.metrics.ascent(&style.font);

        let total_width: f32 = text_box.children.iter().map(|word| word.rect.width).sum();
        let mut offset = match style.text_align {
            TextAlign::Center => (containing.block_width - total_width) / 2.0,
            TextAlign::Right => containing.block_width - total_width,
            TextAlign::Left | TextAlign::Justify => 0.0,
        };

        if containing.parent_tag == Some("li") {
            self.surface
                .draw_text(x + offset, y + ascent, "•", &style.font, style.color);
            offset += BULLET_INDENT;
        }

        for word in &text_box.children {
            let BoxKind::Word(text) = &word.kind else {
                continue;
            };
            let word_x = x + word.rect.x + offset;
            let word_y = y + word.rect.y;
            let baseline = word_y + ascent;
            self.surface
                .draw_text(word_x, baseline, text, &style.font, style.color);

            // [§ 2 'text-decoration-line'](https://www.w3.org/TR/css-text-decor-3/#text-decoration-line-property)
            let line_y = match style.text_decoration {
                TextDecoration::None => continue,
                TextDecoration::Underline => baseline + 1.0,
                TextDecoration::LineThrough => word_y + ascent / 2.0,
                TextDecoration::Overline => word_y,
            };
            self.surface.draw_line(
                (word_x, line_y),
                (word_x + word.rect.width, line_y),
                1.0,
                style.color,
            );
        }
    }
}
