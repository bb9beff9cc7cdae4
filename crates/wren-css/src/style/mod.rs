//! Computed styles, value parsing and the property setter table.

pub mod computed;
pub mod properties;
pub mod values;

pub use computed::{
    BorderStyle, BoxSizing, ComputedStyle, Display, Edges, Font, LineHeight, Offsets, Position,
    StyleMap, TextAlign, TextDecoration, Visibility,
};
pub use properties::{Property, apply_declaration};
pub use values::{Color, DEFAULT_FONT_SIZE_PX, parse_color};
