//! Services the layout engine consumes: text measurement and images.

use std::rc::Rc;

use wren_common::image::LoadedImage;

use crate::style::Font;

/// Font metrics interface for text measurement during layout and paint.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
pub trait TextMeasurer {
    /// Advance width of `text` in `font`.
    fn text_width(&self, font: &Font, text: &str) -> f32;

    /// Height of one line of `font` for `line-height: normal`.
    fn line_height(&self, font: &Font) -> f32;

    /// Distance from the top of a line to the baseline.
    fn ascent(&self, font: &Font) -> f32 {
        font.size * 0.8
    }
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance of Latin glyphs in a proportional font is about 0.6x
/// the font size; line height is 1.2x, the upper end of the recommended range
/// for `normal`. Used in tests and when no font file can be found.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl TextMeasurer for ApproximateFontMetrics {
    fn text_width(&self, font: &Font, text: &str) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font.size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font: &Font) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font.size * LINE_HEIGHT_RATIO
    }
}

/// Where layout gets images from.
///
/// Every method is total: unavailable images are `None`. Network images are
/// never fetched synchronously; a miss in [`ImageService::cached`] is followed
/// by [`ImageService::request_fetch`] and layout is re-run once the host has
/// filled the cache.
pub trait ImageService {
    /// Load and decode a file from the local filesystem.
    fn load_local(&self, path: &str) -> Option<Rc<LoadedImage>>;

    /// Decode the base64 payload of a `data:` URL.
    fn decode_base64(&self, payload: &str) -> Option<Rc<LoadedImage>>;

    /// A previously fetched network image.
    fn cached(&self, url: &str) -> Option<Rc<LoadedImage>>;

    /// Ask for `url` to be fetched in the background.
    fn request_fetch(&self, url: &str);
}

/// An [`ImageService`] that never has any image.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageService for NoImages {
    fn load_local(&self, _path: &str) -> Option<Rc<LoadedImage>> {
        None
    }

    fn decode_base64(&self, _payload: &str) -> Option<Rc<LoadedImage>> {
        None
    }

    fn cached(&self, _url: &str) -> Option<Rc<LoadedImage>> {
        None
    }

    fn request_fetch(&self, _url: &str) {}
}
