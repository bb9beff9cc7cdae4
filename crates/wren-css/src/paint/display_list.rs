//! Display List - a recorded sequence of drawing commands.
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! A [`DisplayList`] is itself a [`DrawingSurface`]: painting into it records
//! the commands in painting order (back to front), and [`DisplayList::replay`]
//! sends them to another surface later.

use wren_common::image::LoadedImage;

use super::surface::DrawingSurface;
use crate::layout::Rect;
use crate::style::{BorderStyle, Color, Font};

/// A single drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color. Used for backgrounds.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Outline a rectangle. Used for borders.
    StrokeRect {
        /// Outlined rectangle.
        rect: Rect,
        /// Line width in pixels.
        width: f32,
        /// Line color.
        color: Color,
        /// Line style.
        style: BorderStyle,
    },
    /// Draw text at a baseline origin.
    DrawText {
        /// X coordinate of the baseline origin.
        x: f32,
        /// Y coordinate of the baseline.
        baseline: f32,
        /// The text.
        text: String,
        /// Font to draw with.
        font: Font,
        /// Text color.
        color: Color,
    },
    /// Draw a line. Used for text decorations.
    DrawLine {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Line width in pixels.
        width: f32,
        /// Line color.
        color: Color,
    },
    /// Draw an image into a rectangle.
    DrawImage {
        /// Destination rectangle.
        rect: Rect,
        /// The pixels.
        image: LoadedImage,
    },
    /// Change the opacity multiplier for the commands that follow.
    SetOpacity(f32),
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
    opacity: f32,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            opacity: 1.0,
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The text of every `DrawText`, in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Execute every command against `surface`.
    pub fn replay(&self, surface: &mut dyn DrawingSurface) {
        for command in &self.commands {
            match command {
                DisplayCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
                DisplayCommand::StrokeRect {
                    rect,
                    width,
                    color,
                    style,
                } => surface.stroke_rect(*rect, *width, *color, *style),
                DisplayCommand::DrawText {
                    x,
                    baseline,
                    text,
                    font,
                    color,
                } => surface.draw_text(*x, *baseline, text, font, *color),
                DisplayCommand::DrawLine {
                    from,
                    to,
                    width,
                    color,
                } => surface.draw_line(*from, *to, *width, *color),
                DisplayCommand::DrawImage { rect, image } => surface.draw_image(*rect, image),
                DisplayCommand::SetOpacity(opacity) => surface.set_opacity(*opacity),
            }
        }
    }
}

impl DrawingSurface for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DisplayCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color, style: BorderStyle) {
        self.push(DisplayCommand::StrokeRect {
            rect,
            width,
            color,
            style,
        });
    }

    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, font: &Font, color: Color) {
        self.push(DisplayCommand::DrawText {
            x,
            baseline,
            text: text.to_string(),
            font: font.clone(),
            color,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        self.push(DisplayCommand::DrawLine {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_image(&mut self, rect: Rect, image: &LoadedImage) {
        self.push(DisplayCommand::DrawImage {
            rect,
            image: image.clone(),
        });
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        if (opacity - self.opacity).abs() > f32::EPSILON {
            self.push(DisplayCommand::SetOpacity(opacity));
        }
        self.opacity = opacity;
    }
}
