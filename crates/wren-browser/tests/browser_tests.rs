//! Integration tests for the browser host.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use wren_browser::{Browser, BrowserConfig, ImageCache, LoadError};
use wren_common::net::NetError;
use wren_css::{ApproximateFontMetrics, BoxKind, LayoutBox};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 255, 255]));
    let mut bytes = Cursor::new(Vec::new());
    buffer
        .write_to(&mut bytes, image::ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[allow(clippy::unnecessary_wraps)]
fn serve_png(_url: &str) -> Result<Vec<u8>, NetError> {
    Ok(png_bytes(4, 2))
}

fn browser() -> Browser {
    Browser::with_services(
        BrowserConfig::default(),
        Box::new(ApproximateFontMetrics),
        ImageCache::with_fetcher(serve_png),
    )
}

/// A scratch directory unique to this test.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wren-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn find_image(layout_box: &LayoutBox) -> Option<&LayoutBox> {
    if matches!(layout_box.kind, BoxKind::Image(_)) {
        return Some(layout_box);
    }
    layout_box.children.iter().find_map(find_image)
}

fn page_text(browser: &Browser) -> String {
    let dom = browser.dom().unwrap();
    dom.text_content(dom.root().unwrap())
}

#[test]
fn test_load_html_renders_and_records_history() {
    let mut browser = browser();
    browser.load_html("<p>Hello</p>", None).unwrap();

    assert_eq!(browser.history().entries().len(), 1);
    assert!(browser.styles().is_some());
    let root = browser.layout().unwrap();
    assert!((root.rect.width - 800.0).abs() < f32::EPSILON);
    assert!(page_text(&browser).contains("Hello"));
}

#[test]
fn test_malformed_markup_shows_error_page() {
    let mut browser = browser();
    let result = browser.load_html("<p>Hello</p><div", None);

    assert!(matches!(result, Err(LoadError::Markup(_))));
    assert!(page_text(&browser).contains("could not be loaded"));
    assert_eq!(browser.history().entries().len(), 1);
}

#[test]
fn test_missing_file_shows_error_page() {
    let mut browser = browser();
    let result = browser.navigate("/definitely/not/here.html");

    assert!(matches!(result, Err(LoadError::File { .. })));
    let text = page_text(&browser);
    assert!(text.contains("could not be loaded"));
    assert!(text.contains("/definitely/not/here.html"));
}

#[test]
fn test_click_resolves_link_against_the_document() {
    let dir = scratch("click");
    let page = dir.join("page.html");
    fs::write(
        &page,
        r#"<html><body><a href="next.html">Next</a></body></html>"#,
    )
    .unwrap();
    let url = page.to_string_lossy().into_owned();

    let mut browser = browser();
    browser.navigate(&url).unwrap();
    assert_eq!(browser.base_url(), Some(url.as_str()));

    // body padding is 8px; the link text starts there.
    let target = browser.click(12.0, 12.0).unwrap();
    assert_eq!(PathBuf::from(target), dir.join("next.html"));
    assert!(browser.click(700.0, 500.0).is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_back_and_forward_rerender_history_entries() {
    let mut browser = browser();
    browser.load_html("<p>First</p>", None).unwrap();
    browser.load_html("<p>Second</p>", None).unwrap();

    assert!(browser.back());
    assert!(page_text(&browser).contains("First"));
    assert!(!browser.back());

    assert!(browser.forward());
    assert!(page_text(&browser).contains("Second"));
    assert!(!browser.forward());
}

#[test]
fn test_resize_relayouts_only_on_width_change() {
    let mut browser = browser();
    browser.load_html("<div>text</div>", None).unwrap();

    assert!(!browser.resize(800.0, 300.0));
    assert!((browser.viewport().height - 300.0).abs() < f32::EPSILON);

    assert!(browser.resize(640.0, 300.0));
    let root = browser.layout().unwrap();
    assert!((root.rect.width - 640.0).abs() < f32::EPSILON);
}

#[test]
fn test_network_image_arrives_after_waiting() {
    let mut browser = browser();
    browser
        .load_html(
            r#"<html><body><img src="https://example.com/a.png"></body></html>"#,
            None,
        )
        .unwrap();

    let placeholder = find_image(browser.layout().unwrap()).unwrap();
    assert!(placeholder.rect.width.abs() < f32::EPSILON);
    assert_eq!(browser.images().pending_count(), 1);

    assert!(browser.wait_for_images());
    let loaded = find_image(browser.layout().unwrap()).unwrap();
    assert!((loaded.rect.width - 4.0).abs() < f32::EPSILON);
    assert!((loaded.rect.height - 2.0).abs() < f32::EPSILON);

    assert!(!browser.poll_images());
}

#[test]
fn test_rasterize_paints_backgrounds() {
    let mut browser = browser();
    browser
        .load_html(
            r#"<div style="background-color: red; height: 50px"></div>"#,
            None,
        )
        .unwrap();

    let renderer = browser.rasterize().unwrap();
    assert_eq!((renderer.width(), renderer.height()), (800, 600));
    assert_eq!(renderer.pixel(20, 20), Some([255, 0, 0, 255]));
    assert_eq!(renderer.pixel(20, 100), Some([255, 255, 255, 255]));
}

#[test]
fn test_content_width_tracks_wide_content() {
    let mut browser = browser();
    browser
        .load_html(
            r#"<html><body><div style="width: 1200px">wide</div></body></html>"#,
            None,
        )
        .unwrap();
    // body padding 8 + 1200
    assert!((browser.content_width() - 1208.0).abs() < 0.01);
}
