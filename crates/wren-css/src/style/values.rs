//! Value parsers shared by the property setters.
//!
//! Every parser is total: input it does not understand maps to a documented
//! fallback instead of an error.

use std::fmt;

use serde::Serialize;

/// Font size used when nothing else applies.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
///
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color from channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from channels with alpha.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether painting this color would draw nothing.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// [§ 5.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    ///
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // "The three-digit RGB notation (#RGB) is converted into six-digit form
            // (#RRGGBB) by replicating digits, not by adding zeros."
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, [r, g, b])| Self::rgb(r, g, b))
            .or_else(|| name.eq_ignore_ascii_case("transparent").then_some(Self::TRANSPARENT))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != u8::MAX {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
///
/// The named colors that show up in hand-written pages.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("silver", [192, 192, 192]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("white", [255, 255, 255]),
    ("maroon", [128, 0, 0]),
    ("red", [255, 0, 0]),
    ("purple", [128, 0, 128]),
    ("fuchsia", [255, 0, 255]),
    ("magenta", [255, 0, 255]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("olive", [128, 128, 0]),
    ("yellow", [255, 255, 0]),
    ("navy", [0, 0, 128]),
    ("blue", [0, 0, 255]),
    ("teal", [0, 128, 128]),
    ("aqua", [0, 255, 255]),
    ("cyan", [0, 255, 255]),
    ("orange", [255, 165, 0]),
    ("aliceblue", [240, 248, 255]),
    ("beige", [245, 245, 220]),
    ("brown", [165, 42, 42]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("crimson", [220, 20, 60]),
    ("darkblue", [0, 0, 139]),
    ("darkgray", [169, 169, 169]),
    ("darkgrey", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkred", [139, 0, 0]),
    ("darkorange", [255, 140, 0]),
    ("darkslategray", [47, 79, 79]),
    ("deeppink", [255, 20, 147]),
    ("dimgray", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("hotpink", [255, 105, 180]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lightblue", [173, 216, 230]),
    ("lightgray", [211, 211, 211]),
    ("lightgrey", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightyellow", [255, 255, 224]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("navajowhite", [255, 222, 173]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("rebeccapurple", [102, 51, 153]),
    ("royalblue", [65, 105, 225]),
    ("salmon", [250, 128, 114]),
    ("seagreen", [46, 139, 87]),
    ("sienna", [160, 82, 45]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("whitesmoke", [245, 245, 245]),
    ("yellowgreen", [154, 205, 50]),
];

/// Parse a color value.
///
/// Values of three characters or fewer, and anything not starting with
/// `rgb`, go to the named / hex resolver. `rgb()` and `rgba()` are scanned
/// digit by digit, splitting on `,` and `)`; the alpha of `rgba()` is a
/// fraction scaled to 0-255.
///
/// Returns `None` when the color cannot be resolved.
#[must_use]
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if value.len() <= 3 || !value.starts_with("rgb") {
        return if value.starts_with('#') {
            Color::from_hex(value)
        } else {
            Color::from_named(value)
        };
    }

    let mut components = Vec::new();
    let mut number = String::new();
    for c in value.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
        } else if c == ',' || c == ')' {
            if !number.is_empty() {
                components.push(number.parse::<f32>().ok()?);
            }
            number.clear();
        }
    }

    let channel = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    match components.as_slice() {
        [r, g, b, a] => Some(Color::rgba(channel(*r), channel(*g), channel(*b), channel(a * 255.0))),
        [r, g, b, ..] => Some(Color::rgb(channel(*r), channel(*g), channel(*b))),
        _ => None,
    }
}

/// Leading numeric prefix of `value`, ignoring any unit after it.
///
/// Accepts an optional sign, digits and one decimal point, like `strtof`
/// without exponents. `"12.5px"` is 12.5, `"-3em"` is -3, `"auto"` is `None`.
#[must_use]
pub fn parse_number_prefix(value: &str) -> Option<f32> {
    let value = value.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in value.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => seen_digit = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    value[..end].parse().ok()
}

/// A length, falling back to `default` when no number leads the value.
#[must_use]
pub fn parse_length_or(value: &str, default: f32) -> f32 {
    parse_number_prefix(value).unwrap_or(default)
}

/// [§ 2.5 Font size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// Absolute-size keywords, then a number with a two-letter unit
/// (`px`/`pt` as-is, `cm`, `mm`, `in` converted at 96 px per inch), then a
/// bare number taken as pixels. Anything else is 16.
#[must_use]
pub fn parse_font_size(value: &str) -> f32 {
    let value = value.trim();
    let keyword = match value {
        "xx-small" => Some(9.0),
        "x-small" => Some(10.0),
        "small" => Some(13.0),
        "medium" => Some(16.0),
        "large" => Some(18.0),
        "x-large" => Some(24.0),
        "xx-large" => Some(32.0),
        _ => None,
    };
    if let Some(size) = keyword {
        return size;
    }

    if let Ok(px) = value.parse::<f32>() {
        return px.round();
    }

    let split = value.len().saturating_sub(2);
    let (Some(number), Some(unit)) = (value.get(..split), value.get(split..)) else {
        return DEFAULT_FONT_SIZE_PX;
    };
    let Ok(number) = number.trim().parse::<f32>() else {
        return DEFAULT_FONT_SIZE_PX;
    };
    let scale = match unit {
        "px" | "pt" => 1.0,
        "cm" => 37.8,
        "mm" => 3.78,
        "in" => 96.0,
        _ => return DEFAULT_FONT_SIZE_PX,
    };
    (number * scale).round()
}

/// [§ 2.2 Font weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// `normal` is 400 and `bold` 700. Numbers in `[100, 1000)` are rounded to the
/// nearest hundred and clamped to 100-900; everything else is 400.
#[must_use]
pub fn parse_font_weight(value: &str) -> u16 {
    match value.trim() {
        "normal" => 400,
        "bold" => 700,
        other => match parse_number_prefix(other) {
            Some(weight) if (100.0..1000.0).contains(&weight) => {
                ((weight / 100.0).round() * 100.0).clamp(100.0, 900.0) as u16
            }
            _ => 400,
        },
    }
}

/// First family of a `font-family` list, without quotes.
#[must_use]
pub fn parse_font_family(value: &str) -> String {
    let first = value.split(',').next().unwrap_or(value).trim();
    first.trim_matches(|c| c == '"' || c == '\'').to_string()
}

/// Split a shorthand into 1-4 lengths and spread them over
/// `[top, right, bottom, left]`.
///
/// `None` when the value has no tokens.
#[must_use]
pub fn parse_box_shorthand(value: &str) -> Option<[f32; 4]> {
    let parts: Vec<f32> = value
        .split_whitespace()
        .map(|part| parse_length_or(part, 0.0))
        .collect();
    match parts.as_slice() {
        [] => None,
        [all] => Some([*all; 4]),
        [vertical, horizontal] => Some([*vertical, *horizontal, *vertical, *horizontal]),
        [top, horizontal, bottom] => Some([*top, *horizontal, *bottom, *horizontal]),
        [top, right, bottom, left, ..] => Some([*top, *right, *bottom, *left]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_display_is_hex() {
        assert_eq!(Color::rgb(255, 0, 16).to_string(), "#ff0010");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
    }

    #[test]
    fn test_named_and_hex_colors() {
        assert_eq!(parse_color("red"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(parse_color("#fff"), Some(Color::WHITE));
        assert_eq!(parse_color("#00ff0080"), Some(Color::rgba(0, 255, 0, 128)));
        assert_eq!(parse_color("#abcd"), Some(Color::rgba(0xaa, 0xbb, 0xcc, 0xdd)));
        assert_eq!(parse_color("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(parse_color("notacolor"), None);
        assert_eq!(parse_color("#12"), None);
    }

    #[test]
    fn test_rgb_functions() {
        assert_eq!(parse_color("rgb(10, 20, 30)"), Some(Color::rgb(10, 20, 30)));
        assert_eq!(
            parse_color("rgba(10,20,30,0.5)"),
            Some(Color::rgba(10, 20, 30, 128))
        );
        assert_eq!(parse_color("rgb(1)"), None);
    }

    #[test]
    fn test_number_prefix() {
        assert_eq!(parse_number_prefix("12.5px"), Some(12.5));
        assert_eq!(parse_number_prefix("-3em"), Some(-3.0));
        assert_eq!(parse_number_prefix(".5"), Some(0.5));
        assert_eq!(parse_number_prefix("auto"), None);
        assert_eq!(parse_number_prefix("-"), None);
    }

    #[test]
    fn test_font_size_units() {
        assert!((parse_font_size("x-large") - 24.0).abs() < f32::EPSILON);
        assert!((parse_font_size("12px") - 12.0).abs() < f32::EPSILON);
        assert!((parse_font_size("12pt") - 12.0).abs() < f32::EPSILON);
        assert!((parse_font_size("1in") - 96.0).abs() < f32::EPSILON);
        assert!((parse_font_size("1cm") - 38.0).abs() < f32::EPSILON);
        assert!((parse_font_size("10mm") - 38.0).abs() < f32::EPSILON);
        assert!((parse_font_size("20") - 20.0).abs() < f32::EPSILON);
        assert!((parse_font_size("2em") - 16.0).abs() < f32::EPSILON);
        assert!((parse_font_size("huge") - 16.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_font_weight_buckets() {
        assert_eq!(parse_font_weight("bold"), 700);
        assert_eq!(parse_font_weight("normal"), 400);
        assert_eq!(parse_font_weight("640"), 600);
        assert_eq!(parse_font_weight("660"), 700);
        assert_eq!(parse_font_weight("950"), 900);
        assert_eq!(parse_font_weight("100"), 100);
        assert_eq!(parse_font_weight("50"), 400);
        assert_eq!(parse_font_weight("1000"), 400);
        assert_eq!(parse_font_weight("heavy"), 400);
    }

    #[test]
    fn test_box_shorthand_spreads_sides() {
        assert_eq!(parse_box_shorthand("10px"), Some([10.0; 4]));
        assert_eq!(parse_box_shorthand("10px 20px"), Some([10.0, 20.0, 10.0, 20.0]));
        assert_eq!(
            parse_box_shorthand("10px 20px 30px"),
            Some([10.0, 20.0, 30.0, 20.0])
        );
        assert_eq!(
            parse_box_shorthand("10px 20px 30px 40px 50px"),
            Some([10.0, 20.0, 30.0, 40.0])
        );
        assert_eq!(parse_box_shorthand("auto 5px"), Some([0.0, 5.0, 0.0, 5.0]));
    }

    #[test]
    fn test_font_family_takes_first() {
        assert_eq!(parse_font_family("'times new roman', serif"), "times new roman");
    }
}
