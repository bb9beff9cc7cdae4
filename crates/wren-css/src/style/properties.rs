//! The property setter table.
//!
//! [§ 1 Property index](https://www.w3.org/TR/CSS2/propidx.html)
//!
//! Every supported property is a [`Property`] variant. Its name parses with
//! `Property::from_str` and [`Property::apply`] maps a style plus a raw value
//! to the updated style. Unknown names never reach the table.

use std::str::FromStr;

use strum_macros::{Display, EnumString, IntoStaticStr};
use wren_common::warning::warn_once;

use super::computed::{
    BorderStyle, BoxSizing, ComputedStyle, Display as DisplayValue, Edges, LineHeight, Position,
    TextAlign, TextDecoration, Visibility,
};
use super::values::{
    parse_box_shorthand, parse_color, parse_font_family, parse_font_size, parse_font_weight,
    parse_length_or, parse_number_prefix,
};

/// A supported CSS property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum Property {
    Color,
    BackgroundColor,
    FontSize,
    FontWeight,
    FontStyle,
    FontFamily,
    Width,
    Height,
    Margin,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Padding,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Border,
    BorderWidth,
    BorderColor,
    BorderStyle,
    BoxSizing,
    Display,
    Position,
    Top,
    Right,
    Bottom,
    Left,
    TextAlign,
    TextDecoration,
    LineHeight,
    Visibility,
    Opacity,
}

impl Property {
    /// Apply `value` to `style`, returning the updated style.
    ///
    /// Never fails: each property has a fallback for values it does not
    /// understand (see the individual arms).
    #[must_use]
    pub fn apply(self, mut style: ComputedStyle, value: &str) -> ComputedStyle {
        let value = value.trim();
        match self {
            // Unresolvable colors leave the property as it was.
            Self::Color => {
                if let Some(color) = parse_color(value) {
                    style.color = color;
                }
            }
            Self::BackgroundColor => {
                if let Some(color) = parse_color(value) {
                    style.background_color = color;
                }
            }
            Self::BorderColor => {
                if let Some(color) = parse_color(value) {
                    style.border_color = color;
                }
            }

            Self::FontSize => style.font.size = parse_font_size(value),
            Self::FontWeight => style.font.weight = parse_font_weight(value),
            Self::FontStyle => style.font.italic = matches!(value, "italic" | "oblique"),
            Self::FontFamily => style.font.family = parse_font_family(value),

            // [§ 10.2](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
            // "auto" and anything without a number is auto.
            Self::Width => style.width = parse_number_prefix(value),
            Self::Height => style.height = parse_number_prefix(value),

            Self::Margin => {
                if let Some(sides) = parse_box_shorthand(value) {
                    style.margin = Edges::from_array(sides);
                }
            }
            Self::MarginTop => style.margin.top = parse_length_or(value, 0.0),
            Self::MarginRight => style.margin.right = parse_length_or(value, 0.0),
            Self::MarginBottom => style.margin.bottom = parse_length_or(value, 0.0),
            Self::MarginLeft => style.margin.left = parse_length_or(value, 0.0),

            Self::Padding => {
                if let Some(sides) = parse_box_shorthand(value) {
                    style.padding = Edges::from_array(sides);
                }
            }
            Self::PaddingTop => style.padding.top = parse_length_or(value, 0.0),
            Self::PaddingRight => style.padding.right = parse_length_or(value, 0.0),
            Self::PaddingBottom => style.padding.bottom = parse_length_or(value, 0.0),
            Self::PaddingLeft => style.padding.left = parse_length_or(value, 0.0),

            // [§ 4.4 'border' shorthand](https://www.w3.org/TR/css-backgrounds-3/#border-shorthands)
            //
            // Tokens are classified one by one, in any order.
            Self::Border => {
                for token in value.split_whitespace() {
                    if token.starts_with(|c: char| c.is_ascii_digit()) {
                        style.border_width = parse_length_or(token, 0.0);
                    } else if matches!(token, "solid" | "dashed" | "dotted") {
                        style.border_style = parse_border_style(token);
                    } else if let Some(color) = parse_color(token) {
                        style.border_color = color;
                    }
                }
            }
            Self::BorderWidth => style.border_width = parse_length_or(value, 0.0),
            Self::BorderStyle => style.border_style = parse_border_style(value),
            Self::BoxSizing => {
                style.box_sizing = if value == "border-box" {
                    BoxSizing::BorderBox
                } else {
                    BoxSizing::ContentBox
                };
            }

            Self::Display => {
                style.display = DisplayValue::from_str(value).unwrap_or(DisplayValue::None);
            }
            Self::Position => {
                style.position = match value {
                    "relative" => Position::Relative,
                    "absolute" => Position::Absolute,
                    "fixed" => Position::Fixed,
                    _ => Position::Static,
                };
            }
            Self::Top => style.offsets.top = Some(parse_length_or(value, 0.0)),
            Self::Right => style.offsets.right = Some(parse_length_or(value, 0.0)),
            Self::Bottom => style.offsets.bottom = Some(parse_length_or(value, 0.0)),
            Self::Left => style.offsets.left = Some(parse_length_or(value, 0.0)),

            Self::TextAlign => {
                style.text_align = match value {
                    "center" => TextAlign::Center,
                    "right" => TextAlign::Right,
                    "justify" => TextAlign::Justify,
                    _ => TextAlign::Left,
                };
            }
            Self::TextDecoration => {
                style.text_decoration =
                    TextDecoration::from_str(value).unwrap_or(TextDecoration::None);
                style.font.underline = style.text_decoration == TextDecoration::Underline;
            }
            Self::LineHeight => style.line_height = parse_line_height(value),
            Self::Visibility => {
                style.visibility = Visibility::from_str(value).unwrap_or(Visibility::Visible);
            }
            Self::Opacity => {
                style.opacity = parse_number_prefix(value).map_or(1.0, |o| o.clamp(0.0, 1.0));
            }
        }
        style
    }
}

/// `solid`, `dashed` or `dotted`; anything else is `none`.
fn parse_border_style(value: &str) -> BorderStyle {
    match value {
        "solid" => BorderStyle::Solid,
        "dashed" => BorderStyle::Dashed,
        "dotted" => BorderStyle::Dotted,
        _ => BorderStyle::None,
    }
}

/// [§ 4.2 'line-height'](https://www.w3.org/TR/css-inline-3/#line-height-property)
///
/// A bare number multiplies the font size, a percentage too (`150%` is
/// `1.5`), a length is pixels. `normal` and junk resolve through the text
/// measurer.
fn parse_line_height(value: &str) -> LineHeight {
    if value == "normal" {
        return LineHeight::Normal;
    }
    if let Ok(factor) = value.parse::<f32>() {
        return LineHeight::Number(factor);
    }
    match (parse_number_prefix(value), value.ends_with('%')) {
        (Some(percent), true) => LineHeight::Number(percent / 100.0),
        (Some(px), false) => LineHeight::Px(px),
        (None, _) => LineHeight::Normal,
    }
}

/// Apply one declaration by property name.
///
/// Unknown properties are ignored and reported once.
pub fn apply_declaration(style: &mut ComputedStyle, name: &str, value: &str) {
    match Property::from_str(name) {
        Ok(property) => *style = property.apply(std::mem::take(style), value),
        Err(_) => warn_once("CSS", &format!("unsupported property '{name}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::values::Color;

    fn with(name: &str, value: &str) -> ComputedStyle {
        let mut style = ComputedStyle::default();
        apply_declaration(&mut style, name, value);
        style
    }

    #[test]
    fn test_property_names_are_kebab_case() {
        assert_eq!(Property::from_str("background-color"), Ok(Property::BackgroundColor));
        assert_eq!(Property::from_str("margin-left"), Ok(Property::MarginLeft));
        assert!(Property::from_str("float").is_err());
        assert_eq!(Property::LineHeight.to_string(), "line-height");
    }

    #[test]
    fn test_unresolvable_color_keeps_previous() {
        let style = with("color", "red");
        let style = Property::Color.apply(style, "not-a-color");
        assert_eq!(style.color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_margin_shorthand() {
        let style = with("margin", "10px 20px");
        assert_eq!(style.margin, Edges::from_array([10.0, 20.0, 10.0, 20.0]));
        let style = with("margin", "10px 20px 30px 40px");
        assert_eq!(style.margin, Edges::from_array([10.0, 20.0, 30.0, 40.0]));
        let style = with("padding", "1px 2px 3px");
        assert_eq!(style.padding, Edges::from_array([1.0, 2.0, 3.0, 2.0]));
    }

    #[test]
    fn test_width_auto_and_lengths() {
        assert_eq!(with("width", "auto").width, None);
        assert_eq!(with("width", "120px").width, Some(120.0));
        assert!((with("margin-top", "junk").margin.top).abs() < f32::EPSILON);
    }

    #[test]
    fn test_border_shorthand_in_any_order() {
        let style = with("border", "red dashed 3px");
        assert!((style.border_width - 3.0).abs() < f32::EPSILON);
        assert_eq!(style.border_style, BorderStyle::Dashed);
        assert_eq!(style.border_color, Color::rgb(255, 0, 0));
        assert_eq!(with("border-style", "groove").border_style, BorderStyle::None);
    }

    #[test]
    fn test_keyword_fallbacks() {
        assert_eq!(with("display", "block").display, DisplayValue::Block);
        assert_eq!(with("display", "flex").display, DisplayValue::None);
        assert_eq!(with("position", "sticky").position, Position::Static);
        assert_eq!(with("visibility", "collapse").visibility, Visibility::Hidden);
        assert_eq!(with("text-align", "start").text_align, TextAlign::Left);
        assert_eq!(with("box-sizing", "border-box").box_sizing, BoxSizing::BorderBox);
    }

    #[test]
    fn test_offsets_are_recorded_as_set() {
        let style = with("left", "junk");
        assert_eq!(style.offsets.left, Some(0.0));
        assert_eq!(style.offsets.top, None);
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert!((with("opacity", "2").opacity - 1.0).abs() < f32::EPSILON);
        assert!((with("opacity", "-1").opacity).abs() < f32::EPSILON);
        assert!((with("opacity", "half").opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_line_height_forms() {
        assert_eq!(with("line-height", "1.5").line_height, LineHeight::Number(1.5));
        assert_eq!(with("line-height", "150%").line_height, LineHeight::Number(1.5));
        assert_eq!(with("line-height", "20px").line_height, LineHeight::Px(20.0));
        assert_eq!(with("line-height", "tall").line_height, LineHeight::Normal);
    }

    #[test]
    fn test_text_decoration_sets_underline_flag() {
        let style = with("text-decoration", "underline");
        assert_eq!(style.text_decoration, TextDecoration::Underline);
        assert!(style.font.underline);
        let style = Property::TextDecoration.apply(style, "none");
        assert!(!style.font.underline);
    }
}
