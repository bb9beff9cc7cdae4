//! Software raster surface for headless screenshots.
//!
//! Implements [`DrawingSurface`] on a `tiny_skia::Pixmap`, rasterizing
//! glyphs with fontdue.
//!
//! # Architecture
//!
//! The renderer is the final stage in the pipeline:
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓        ↓
//!             DrawingSurface → Pixels
//! ```
//!
//! The renderer knows nothing about CSS, layout, or the DOM. It only executes
//! the drawing calls the paint walker makes.

use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use tiny_skia::{
    FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8,
    Stroke, StrokeDash, Transform,
};
use wren_common::image::LoadedImage;
use wren_css::style::BorderStyle;
use wren_css::{Color, DrawingSurface, Font, Rect};

use crate::font_metrics::FontSet;

/// A white canvas that paint calls draw onto.
pub struct Renderer {
    pixmap: Pixmap,
    /// Faces for text; `None` skips text entirely.
    fonts: Option<Rc<FontSet>>,
    opacity: f32,
}

impl Renderer {
    /// Create a `width` × `height` canvas filled with white.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero.
    pub fn new(width: u32, height: u32, fonts: Option<Rc<FontSet>>) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .with_context(|| format!("cannot allocate a {width}x{height} canvas"))?;
        pixmap.fill(tiny_skia::Color::WHITE);
        Ok(Self {
            pixmap,
            fonts,
            opacity: 1.0,
        })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA at `(x, y)`, or `None` outside the
    /// canvas.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // Pixmap::pixel only bounds-checks the flat index.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Encode the canvas as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .context("failed to encode screenshot")
    }

    /// Save the canvas to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or written.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.pixmap
            .save_png(path)
            .with_context(|| format!("failed to save screenshot to '{}'", path.display()))
    }

    /// A solid paint for `color`, faded by the current opacity.
    fn paint_for(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, self.faded(color.a));
        paint.anti_alias = true;
        paint
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn faded(&self, alpha: u8) -> u8 {
        (f32::from(alpha) * self.opacity).round().clamp(0.0, 255.0) as u8
    }

    fn pixmap_paint(&self) -> PixmapPaint {
        PixmapPaint {
            opacity: self.opacity,
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        }
    }
}

/// Premultiply straight RGBA so tiny-skia can take the buffer.
fn premultiplied(image: &LoadedImage) -> Option<Pixmap> {
    let mut data = image.rgba_data().to_vec();
    for pixel in data.chunks_exact_mut(4) {
        let alpha = u16::from(pixel[3]);
        for channel in &mut pixel[..3] {
            *channel = u8::try_from(u16::from(*channel) * alpha / 255).unwrap_or(u8::MAX);
        }
    }
    Pixmap::from_vec(data, IntSize::from_wh(image.width(), image.height())?)
}

/// A glyph coverage bitmap tinted with `color`.
fn glyph_pixmap(width: usize, height: usize, coverage: &[u8], color: Color) -> Option<Pixmap> {
    let mut glyph = Pixmap::new(u32::try_from(width).ok()?, u32::try_from(height).ok()?)?;
    let scale = |channel: u8, alpha: u16| {
        u8::try_from(u16::from(channel) * alpha / 255).unwrap_or(u8::MAX)
    };
    for (pixel, &cover) in glyph.pixels_mut().iter_mut().zip(coverage) {
        let alpha = u16::from(cover) * u16::from(color.a) / 255;
        if let Some(tinted) = PremultipliedColorU8::from_rgba(
            scale(color.r, alpha),
            scale(color.g, alpha),
            scale(color.b, alpha),
            u8::try_from(alpha).unwrap_or(u8::MAX),
        ) {
            *pixel = tinted;
        }
    }
    Some(glyph)
}

impl DrawingSurface for Renderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(area) = tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
        else {
            return;
        };
        let paint = self.paint_for(color);
        self.pixmap
            .fill_rect(area, &paint, Transform::identity(), None);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color, style: BorderStyle) {
        if width <= 0.0 || style == BorderStyle::None {
            return;
        }
        // The stroke is centered on the path; inset so the border stays
        // inside the box.
        let half = width / 2.0;
        let Some(inner) = tiny_skia::Rect::from_xywh(
            rect.x + half,
            rect.y + half,
            rect.width - width,
            rect.height - width,
        ) else {
            // Too small to have an inside: the border covers everything.
            self.fill_rect(rect, color);
            return;
        };

        let mut stroke = Stroke {
            width,
            ..Stroke::default()
        };
        stroke.dash = match style {
            BorderStyle::Dashed => StrokeDash::new(vec![width * 3.0, width * 3.0], 0.0),
            BorderStyle::Dotted => StrokeDash::new(vec![width, width], 0.0),
            BorderStyle::Solid | BorderStyle::None => None,
        };

        let path = PathBuilder::from_rect(inner);
        let paint = self.paint_for(color);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, font: &Font, color: Color) {
        let Some(fonts) = self.fonts.clone() else {
            return;
        };
        let face = fonts.select(font);
        let paint = self.pixmap_paint();

        let mut cursor_x = x;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, bitmap) = face.rasterize(ch, font.size);

            // fontdue's ymin is the bitmap's bottom edge relative to the
            // baseline, positive upwards.
            let glyph_x = cursor_x.round() as i32 + metrics.xmin;
            let glyph_y = baseline.round() as i32
                - metrics.ymin
                - i32::try_from(metrics.height).unwrap_or(0);

            if let Some(glyph) = glyph_pixmap(metrics.width, metrics.height, &bitmap, color) {
                self.pixmap.draw_pixmap(
                    glyph_x,
                    glyph_y,
                    glyph.as_ref(),
                    &paint,
                    Transform::identity(),
                    None,
                );
            }
            cursor_x += metrics.advance_width;
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.0, from.1);
        builder.line_to(to.0, to.1);
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        let paint = self.paint_for(color);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn draw_image(&mut self, rect: Rect, image: &LoadedImage) {
        if image.is_empty() || rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let Some(source) = premultiplied(image) else {
            return;
        };
        let (intrinsic_w, intrinsic_h) = image.dimensions_f32();
        let transform = Transform::from_row(
            rect.width / intrinsic_w,
            0.0,
            0.0,
            rect.height / intrinsic_h,
            rect.x,
            rect.y,
        );
        let paint = self.pixmap_paint();
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }
}
