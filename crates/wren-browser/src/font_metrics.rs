//! Font loading and fontdue-backed text measurement.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::path::Path;
use std::rc::Rc;

use fontdue::FontSettings;
use wren_common::warning::warn_once;
use wren_css::{Font, TextMeasurer};

/// Common system font paths to search for a default (regular) font.
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths for bold variants.
const FONT_BOLD_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths for italic variants.
const FONT_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths for bold-italic variants.
const FONT_BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// Parse one font file. `None` if it is missing or not a font.
#[must_use]
pub fn load_font_file(path: &Path) -> Option<fontdue::Font> {
    let data = std::fs::read(path).ok()?;
    fontdue::Font::from_bytes(data, FontSettings::default()).ok()
}

fn load_font_from_paths(paths: &[&str]) -> Option<fontdue::Font> {
    paths.iter().find_map(|path| load_font_file(Path::new(path)))
}

/// A regular face plus whichever bold and italic variants were found.
///
/// Shared between the text measurer and the raster surface so both see the
/// same advances.
pub struct FontSet {
    regular: fontdue::Font,
    bold: Option<fontdue::Font>,
    italic: Option<fontdue::Font>,
    bold_italic: Option<fontdue::Font>,
}

impl FontSet {
    /// Load the faces.
    ///
    /// An explicit `font_path` is used as the regular face (falling back to
    /// the system search if it cannot be read); variants always come from
    /// the system search. `None` when no regular face exists at all.
    #[must_use]
    pub fn load(font_path: Option<&Path>) -> Option<Self> {
        let explicit = font_path.and_then(|path| {
            let font = load_font_file(path);
            if font.is_none() {
                warn_once(
                    "font",
                    &format!("could not load font '{}'", path.display()),
                );
            }
            font
        });

        let Some(regular) = explicit.or_else(|| load_font_from_paths(FONT_SEARCH_PATHS)) else {
            warn_once(
                "font",
                "no system font found; text is measured approximately and not drawn",
            );
            return None;
        };

        Some(Self::from_regular(regular).with_variants(
            load_font_from_paths(FONT_BOLD_SEARCH_PATHS),
            load_font_from_paths(FONT_ITALIC_SEARCH_PATHS),
            load_font_from_paths(FONT_BOLD_ITALIC_SEARCH_PATHS),
        ))
    }

    /// A set with only a regular face.
    #[must_use]
    pub const fn from_regular(regular: fontdue::Font) -> Self {
        Self {
            regular,
            bold: None,
            italic: None,
            bold_italic: None,
        }
    }

    fn with_variants(
        mut self,
        bold: Option<fontdue::Font>,
        italic: Option<fontdue::Font>,
        bold_italic: Option<fontdue::Font>,
    ) -> Self {
        self.bold = bold;
        self.italic = italic;
        self.bold_italic = bold_italic;
        self
    }

    /// The best face for `font`: exact match, then partial match, then
    /// regular.
    #[must_use]
    pub fn select(&self, font: &Font) -> &fontdue::Font {
        let face = match (font.is_bold(), font.italic) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref()),
            (true, false) => self.bold.as_ref(),
            (false, true) => self.italic.as_ref(),
            (false, false) => None,
        };
        face.unwrap_or(&self.regular)
    }
}

/// [`TextMeasurer`] backed by fontdue's per-glyph metrics.
///
/// Uses `Font::metrics()` rather than `Font::rasterize()`; layout only needs
/// advances.
#[derive(Clone)]
pub struct FontdueMetrics {
    fonts: Rc<FontSet>,
}

impl FontdueMetrics {
    /// Measure with `fonts`.
    #[must_use]
    pub const fn new(fonts: Rc<FontSet>) -> Self {
        Self { fonts }
    }

    /// The faces being measured with.
    #[must_use]
    pub fn fonts(&self) -> Rc<FontSet> {
        Rc::clone(&self.fonts)
    }
}

impl TextMeasurer for FontdueMetrics {
    fn text_width(&self, font: &Font, text: &str) -> f32 {
        // Must agree with the cursor advance in Renderer::draw_text.
        let face = self.fonts.select(font);
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| face.metrics(ch, font.size).advance_width)
            .sum()
    }

    fn line_height(&self, font: &Font) -> f32 {
        // [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
        //
        // "We recommend a used value for 'normal' between 1.0 and 1.2."
        self.fonts
            .select(font)
            .horizontal_line_metrics(font.size)
            .map_or(font.size * 1.2, |m| m.new_line_size.max(font.size))
    }

    fn ascent(&self, font: &Font) -> f32 {
        self.fonts
            .select(font)
            .horizontal_line_metrics(font.size)
            .map_or(font.size * 0.8, |m| m.ascent)
    }
}
