//! Replaced content: images.
//!
//! [§ 10.3.2 Inline, replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)

use std::rc::Rc;

use wren_common::image::LoadedImage;
use wren_common::net::DataUrl;
use wren_common::url::{is_network, resolve_url, to_local_path};
use wren_dom::{ElementData, NodeId};

use super::layout_box::{BoxKind, LayoutBox, Rect};
use super::{LayoutContext, LineState};
use crate::style::ComputedStyle;

/// Fetch the image for a resolved URL.
///
/// `data:` URLs are decoded in place; network URLs come from the cache, and
/// a miss asks for a background fetch; anything else is read from disk.
fn load_image(ctx: &LayoutContext<'_>, url: &str) -> Option<Rc<LoadedImage>> {
    if url.starts_with("data:") {
        let data = DataUrl::parse(url).ok()?;
        return if data.is_base64() {
            ctx.images.decode_base64(data.payload)
        } else {
            None
        };
    }
    if is_network(url) {
        let cached = ctx.images.cached(url);
        if cached.is_none() {
            ctx.images.request_fetch(url);
        }
        return cached;
    }
    ctx.images.load_local(to_local_path(url))
}

/// [§ 10.3.2](https://www.w3.org/TR/CSS2/visudet.html#inline-replaced-width)
///
/// Used size of an image: intrinsic when neither dimension is set, the
/// missing one scaled to keep the aspect ratio when one is, exact when both
/// are. Unavailable images are `0 x 0`.
#[must_use]
pub fn used_size(image: Option<&LoadedImage>, style: &ComputedStyle) -> (f32, f32) {
    let Some(image) = image else {
        return (0.0, 0.0);
    };
    let (intrinsic_width, intrinsic_height) = image.dimensions_f32();
    match (style.width, style.height) {
        (None, None) => (intrinsic_width, intrinsic_height),
        (Some(width), None) if intrinsic_width > 0.0 => {
            (width, width * intrinsic_height / intrinsic_width)
        }
        (None, Some(height)) if intrinsic_height > 0.0 => {
            (height * intrinsic_width / intrinsic_height, height)
        }
        (Some(width), None) => (width, 0.0),
        (None, Some(height)) => (0.0, height),
        (Some(width), Some(height)) => (width, height),
    }
}

/// Lay out an `<img>`.
///
/// The image closes any open line, sits at the line's left edge plus its own
/// left margin, one top margin below the cursor, and leaves the cursor on a
/// fresh line below its bottom margin.
#[must_use]
pub fn layout_image(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    style: ComputedStyle,
    element: &ElementData,
    line: LineState,
) -> (LayoutBox, LineState) {
    let image = element
        .attr("src")
        .filter(|src| !src.is_empty())
        .map(|src| resolve_url(src, ctx.base_url))
        .and_then(|url| load_image(ctx, &url));
    let (width, height) = used_size(image.as_deref(), &style);

    let line = line.close();
    let margin = style.margin;
    let rect = Rect::new(line.padding_left + margin.left, line.y + margin.top, width, height);
    let next = line.below(rect.bottom() + margin.bottom);

    let mut image_box = LayoutBox::new(node, BoxKind::Image(image), style);
    image_box.rect = rect;
    (image_box, next)
}
