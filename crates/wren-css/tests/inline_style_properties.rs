//! Property tests for `style` attribute parsing.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use wren_css::{parse_inline_style, serialize_declarations};

const NAMES: &[&str] = &[
    "color",
    "Background-Color",
    "margin",
    "font-family",
    "width",
    "x",
    "line height",
];

const VALUES: &[&str] = &[
    "red",
    "10PX",
    "1px 2px",
    "rgb(1, 2, 3)",
    "url(a;b)",
    "'Open Sans'",
    "\"a;b\"",
    "calc(1px + (2px))",
    "  bold ",
    "a:b",
    "'open sans",
    "red)",
    "rgb(1, 2",
    "",
];

const SEPARATORS: &[&str] = &[";", "; ", " ;\n", ";;"];

/// A `style` attribute built from realistic pieces. Names repeat, separators
/// and spacing vary, and some values leave a quote or parenthesis open.
#[derive(Debug, Clone)]
struct StyleText(String);

impl Arbitrary for StyleText {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % 6;
        let mut text = String::new();
        for _ in 0..count {
            let name = g.choose(NAMES).copied().unwrap_or("color");
            let value = g.choose(VALUES).copied().unwrap_or("red");
            let separator = g.choose(SEPARATORS).copied().unwrap_or(";");
            let colon = if bool::arbitrary(g) { ":" } else { " : " };
            text.push_str(name);
            text.push_str(colon);
            text.push_str(value);
            text.push_str(separator);
        }
        if bool::arbitrary(g) {
            // Drop the final separator.
            let trimmed = text.trim_end_matches([';', ' ', '\n']).len();
            text.truncate(trimmed);
        }
        Self(text)
    }
}

#[quickcheck]
fn reparsing_serialized_declarations_is_stable(style: StyleText) -> bool {
    let once = parse_inline_style(&style.0);
    let twice = parse_inline_style(&serialize_declarations(&once));
    once == twice
}

#[quickcheck]
fn declarations_are_unique_and_well_formed(style: StyleText) -> bool {
    let declarations = parse_inline_style(&style.0);
    declarations.iter().enumerate().all(|(i, decl)| {
        !decl.property.is_empty()
            && !decl.value.is_empty()
            && !decl.property.contains(char::is_whitespace)
            && declarations[..i].iter().all(|d| d.property != decl.property)
    })
}

#[quickcheck]
fn arbitrary_text_never_panics(text: String) -> bool {
    parse_inline_style(&text)
        .iter()
        .all(|decl| !decl.property.contains(char::is_whitespace))
}
