//! The drawing surface interface.

use wren_common::image::LoadedImage;

use crate::layout::Rect;
use crate::style::{BorderStyle, Color, Font};

/// Something the paint walker can draw on.
///
/// Coordinates are absolute document pixels. Every operation is scaled by
/// the current opacity multiplier.
pub trait DrawingSurface {
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline `rect` with a line `width` pixels wide.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color, style: BorderStyle);

    /// Draw `text` with its baseline at `baseline`.
    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, font: &Font, color: Color);

    /// Draw a straight line.
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color);

    /// Draw `image` scaled into `rect`.
    fn draw_image(&mut self, rect: Rect, image: &LoadedImage);

    /// Current opacity multiplier, in `[0, 1]`.
    fn opacity(&self) -> f32;

    /// Replace the opacity multiplier.
    fn set_opacity(&mut self, opacity: f32);
}
