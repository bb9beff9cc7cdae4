//! Integration tests for painting, hit-testing and link lookup.

use std::rc::Rc;

use wren_common::image::LoadedImage;
use wren_css::style::BorderStyle;
use wren_css::{
    ApproximateFontMetrics, Color, Cssom, DisplayCommand, DisplayList, ImageService, LayoutBox,
    LayoutContext, NoImages, Rect, Viewport, bubble_for_link, compute_styles, content_width,
    find_node_at, layout_document, paint,
};
use wren_dom::{DomTree, NodeId};
use wren_html::parse_document;

const BLOCKS: &str = "div, p, ul, li { display: block; }";

/// Every image path resolves to the same 20x10 image.
struct OneImage;

impl ImageService for OneImage {
    fn load_local(&self, _path: &str) -> Option<Rc<LoadedImage>> {
        Some(Rc::new(LoadedImage::solid(20, 10, [0, 0, 255, 255])))
    }

    fn decode_base64(&self, _payload: &str) -> Option<Rc<LoadedImage>> {
        None
    }

    fn cached(&self, _url: &str) -> Option<Rc<LoadedImage>> {
        None
    }

    fn request_fetch(&self, _url: &str) {}
}

fn build(html: &str, images: &dyn ImageService) -> (DomTree, LayoutBox) {
    let tree = parse_document(html).unwrap();
    let styles = compute_styles(&tree, &Cssom::from_css(BLOCKS));
    let ctx = LayoutContext {
        tree: &tree,
        styles: &styles,
        base_url: None,
        text: &ApproximateFontMetrics,
        images,
    };
    let root = layout_document(&ctx, 800.0).unwrap();
    (tree, root)
}

fn paint_html_in(html: &str, viewport: Viewport) -> DisplayList {
    let (_, root) = build(html, &NoImages);
    let mut list = DisplayList::new();
    paint(&root, &mut list, &ApproximateFontMetrics, viewport);
    list
}

fn paint_html(html: &str) -> DisplayList {
    paint_html_in(html, Viewport::new(800.0, 600.0))
}

fn fills(list: &DisplayList) -> Vec<Rect> {
    list.commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .collect()
}

fn text_positions(list: &DisplayList) -> Vec<(String, f32, f32)> {
    list.commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::DrawText {
                x, baseline, text, ..
            } => Some((text.clone(), *x, *baseline)),
            _ => None,
        })
        .collect()
}

fn approx(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_background_then_border() {
    let list = paint_html(
        r#"<div style="background-color: red; border: 2px solid blue; width: 50px; height: 20px"></div>"#,
    );
    assert_eq!(
        list.commands(),
        &[
            DisplayCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 54.0, 20.0),
                color: Color::rgb(255, 0, 0),
            },
            DisplayCommand::StrokeRect {
                rect: Rect::new(0.0, 0.0, 54.0, 20.0),
                width: 2.0,
                color: Color::rgb(0, 0, 255),
                style: BorderStyle::Solid,
            },
        ]
    );
}

#[test]
fn test_text_is_drawn_on_its_baseline_with_underline() {
    let list = paint_html(
        r#"<div style="font-size: 10px; padding: 4px; text-decoration: underline">hi</div>"#,
    );
    let texts = text_positions(&list);
    assert_eq!(texts.len(), 1);
    let (text, x, baseline) = &texts[0];
    assert_eq!(text, "hi");
    approx(*x, 4.0);
    approx(*baseline, 12.0);

    let line = list
        .commands()
        .iter()
        .find_map(|command| match command {
            DisplayCommand::DrawLine { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .unwrap();
    approx(line.0.1, 13.0);
    approx(line.1.0 - line.0.0, 12.0);
}

#[test]
fn test_line_through_and_overline_positions() {
    let list = paint_html(r#"<div style="font-size: 10px; text-decoration: line-through">a</div>"#);
    let y = list
        .commands()
        .iter()
        .find_map(|command| match command {
            DisplayCommand::DrawLine { from, .. } => Some(from.1),
            _ => None,
        })
        .unwrap();
    approx(y, 4.0);

    let list = paint_html(r#"<div style="font-size: 10px; text-decoration: overline">a</div>"#);
    let y = list
        .commands()
        .iter()
        .find_map(|command| match command {
            DisplayCommand::DrawLine { from, .. } => Some(from.1),
            _ => None,
        })
        .unwrap();
    approx(y, 0.0);
}

#[test]
fn test_text_align_uses_block_width() {
    let list = paint_html(
        r#"<div style="text-align: center; width: 100px; font-size: 10px"><span>ab</span></div>"#,
    );
    approx(text_positions(&list)[0].1, 44.0);

    let list =
        paint_html(r#"<div style="text-align: right; width: 100px; font-size: 10px">ab</div>"#);
    approx(text_positions(&list)[0].1, 88.0);
}

#[test]
fn test_list_items_get_a_bullet() {
    let list = paint_html(r#"<ul style="font-size: 10px"><li>x</li></ul>"#);
    let texts = text_positions(&list);
    assert_eq!(list.texts(), vec!["•", "x"]);
    approx(texts[0].1, 0.0);
    approx(texts[1].1, 15.0);
}

#[test]
fn test_hidden_boxes_skip_their_own_drawing_only() {
    let list = paint_html(
        r#"<div style="visibility: hidden; background-color: red">a<span style="visibility: visible">b</span></div>"#,
    );
    assert!(fills(&list).is_empty());
    assert_eq!(list.texts(), vec!["b"]);
}

#[test]
fn test_opacity_is_multiplied_and_restored() {
    let list = paint_html(
        r#"<div style="opacity: 0.5; background-color: red"><p style="opacity: 0.5; height: 5px; background-color: blue"></p></div>"#,
    );
    let opacities: Vec<f32> = list
        .commands()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::SetOpacity(opacity) => Some(*opacity),
            _ => None,
        })
        .collect();
    assert_eq!(opacities, vec![0.5, 0.25, 0.5, 1.0]);
}

#[test]
fn test_relative_boxes_are_nudged() {
    let list = paint_html(
        r#"<div style="position: relative; left: 10px; top: 5px; right: 2px; width: 10px; height: 10px; background-color: red"></div>"#,
    );
    assert_eq!(fills(&list), vec![Rect::new(8.0, 5.0, 10.0, 10.0)]);
}

#[test]
fn test_fixed_boxes_resolve_against_the_viewport() {
    let viewport = Viewport {
        width: 200.0,
        height: 100.0,
        scroll_x: 0.0,
        scroll_y: 50.0,
    };
    let list = paint_html_in(
        r#"<div style="padding: 30px"><p style="position: fixed; right: 5px; bottom: 5px; width: 20px; height: 10px; background-color: red"></p></div>"#,
        viewport,
    );
    assert_eq!(fills(&list), vec![Rect::new(175.0, 135.0, 20.0, 10.0)]);

    let list = paint_html_in(
        r#"<div style="padding: 30px"><p style="position: fixed; width: 20px; height: 10px; background-color: red"></p></div>"#,
        viewport,
    );
    assert_eq!(fills(&list), vec![Rect::new(0.0, 50.0, 20.0, 10.0)]);
}

#[test]
fn test_images_are_drawn() {
    let (_, root) = build(r#"<div><img src="a.png"></div>"#, &OneImage);
    let mut list = DisplayList::new();
    paint(&root, &mut list, &ApproximateFontMetrics, Viewport::new(800.0, 600.0));
    assert!(matches!(
        list.commands(),
        [DisplayCommand::DrawImage { rect, .. }] if *rect == Rect::new(0.0, 0.0, 20.0, 10.0)
    ));
}

#[test]
fn test_find_node_at_returns_the_deepest_box() {
    let (_, root) = build(
        r#"<div style="width: 100px; height: 100px"><div style="width: 50px; height: 50px"></div></div>"#,
        &NoImages,
    );
    assert_eq!(find_node_at(&root, 10.0, 10.0), Some(NodeId(1)));
    assert_eq!(find_node_at(&root, 50.0, 50.0), Some(NodeId(1)));
    assert_eq!(find_node_at(&root, 80.0, 80.0), Some(NodeId(0)));
    assert_eq!(find_node_at(&root, 200.0, 200.0), None);
}

#[test]
fn test_hidden_and_relative_boxes_in_hit_testing() {
    let (_, root) = build(
        r#"<div style="width: 100px; height: 100px"><p style="display: none; width: 100px; height: 100px"></p></div>"#,
        &NoImages,
    );
    assert_eq!(find_node_at(&root, 10.0, 10.0), Some(NodeId(0)));

    let (_, root) = build(
        r#"<div style="width: 100px; height: 100px"><p style="position: relative; left: 50px; width: 10px; height: 10px"></p></div>"#,
        &NoImages,
    );
    assert_eq!(find_node_at(&root, 55.0, 5.0), Some(NodeId(1)));
    assert_eq!(find_node_at(&root, 5.0, 5.0), Some(NodeId(0)));
}

#[test]
fn test_click_on_word_bubbles_to_link() {
    let (tree, root) = build(
        r#"<div style="font-size: 10px"><a href="/next"><span>go</span></a></div>"#,
        &NoImages,
    );
    let hit = find_node_at(&root, 5.0, 5.0).unwrap();
    assert_eq!(tree.as_text(hit), Some("go"));
    assert_eq!(bubble_for_link(&tree, hit), Some("/next".to_string()));
    assert_eq!(bubble_for_link(&tree, NodeId(0)), None);
}

#[test]
fn test_links_without_href_are_skipped() {
    let tree = parse_document(r#"<div><a href="/outer"><a href="">x</a></a></div>"#).unwrap();
    let text = tree.breadth_first().find(|&id| tree.as_text(id).is_some()).unwrap();
    assert_eq!(bubble_for_link(&tree, text), Some("/outer".to_string()));
}

#[test]
fn test_content_width_reaches_overflowing_children() {
    let (_, root) = build(
        r#"<div style="width: 100px"><p style="width: 300px; margin-left: 10px"></p></div>"#,
        &NoImages,
    );
    approx(content_width(&root), 310.0);

    let (_, root) = build(r#"<div style="width: 100px"></div>"#, &NoImages);
    approx(content_width(&root), 100.0);
}
