//! Browser host for the Wren document engine.
//!
//! This crate owns everything around the engine: loading documents, session
//! history, the image cache, font metrics and a raster surface for
//! screenshots.
//!
//! # Example
//!
//! ```ignore
//! use wren_browser::{Browser, BrowserConfig};
//!
//! let mut browser = Browser::new(BrowserConfig::default());
//! browser.load_html("<p>Hello</p>", None);
//! let renderer = browser.rasterize()?;
//! renderer.save_png("hello.png".as_ref())?;
//! ```

pub mod font_metrics;
pub mod history;
pub mod image_cache;
pub mod renderer;

use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;
use wren_common::net::{NetError, fetch_text};
use wren_common::url::{is_network, resolve_url, to_local_path};
use wren_common::warning::clear_warnings;
use wren_css::{
    ApproximateFontMetrics, Cssom, DrawingSurface, LayoutBox, LayoutContext, StyleMap,
    TextMeasurer, Viewport, bubble_for_link, compute_styles, content_width, extract_stylesheets,
    find_node_at, layout_document, paint,
};
use wren_dom::{DomTree, NodeId};
use wren_html::{HtmlError, parse_document};

pub use font_metrics::{FontSet, FontdueMetrics};
pub use history::{History, HistoryEntry};
pub use image_cache::{ImageCache, ImageError};
pub use renderer::Renderer;

/// Viewport size and font selection for a [`Browser`].
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    /// Viewport width in CSS pixels.
    pub width: f32,
    /// Viewport height in CSS pixels.
    pub height: f32,
    /// A font file to use instead of searching the system.
    pub font_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            font_path: None,
        }
    }
}

/// Failures while loading a document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local file could not be read.
    #[error("failed to read '{path}': {source}")]
    File {
        /// The path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A network fetch failed.
    #[error(transparent)]
    Network(#[from] NetError),
    /// The markup could not be parsed.
    #[error(transparent)]
    Markup(#[from] HtmlError),
}

/// Read a document's source: http(s) URLs over the network, anything else
/// from the filesystem.
///
/// # Errors
///
/// Returns [`LoadError::Network`] or [`LoadError::File`].
pub fn load_source(url: &str) -> Result<String, LoadError> {
    if is_network(url) {
        return Ok(fetch_text(url)?);
    }
    let path = to_local_path(url);
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_string(),
        source,
    })
}

/// The page shown instead of a document that failed to load.
#[must_use]
pub fn error_page(url: &str, error: &LoadError) -> String {
    // The tokenizer has no character references, so markup characters in
    // the message are swapped for lookalikes.
    let safe = |text: &str| text.replace('<', "‹").replace('>', "›");
    format!(
        "<html><head><title>Error</title></head><body>\
         <h1>This page could not be loaded</h1>\
         <p>{}</p><p>{}</p>\
         </body></html>",
        safe(url),
        safe(&error.to_string()),
    )
}

/// Everything derived from the current history entry.
struct Page {
    dom: Rc<DomTree>,
    base_url: Option<String>,
    styles: StyleMap,
    layout: Option<LayoutBox>,
}

/// A single-tab browser: history, viewport, image cache and text measurer.
///
/// Every navigation builds a fresh DOM, style map and layout tree.
/// [`Browser::resize`] and [`Browser::poll_images`] redo layout wholesale.
pub struct Browser {
    config: BrowserConfig,
    viewport: Viewport,
    history: History,
    images: ImageCache,
    metrics: Box<dyn TextMeasurer>,
    fonts: Option<Rc<FontSet>>,
    page: Option<Page>,
}

impl Browser {
    /// A browser measuring text with the configured or system font.
    ///
    /// Falls back to [`ApproximateFontMetrics`] when no font can be found.
    #[must_use]
    pub fn new(config: BrowserConfig) -> Self {
        let fonts = FontSet::load(config.font_path.as_deref()).map(Rc::new);
        let metrics: Box<dyn TextMeasurer> = match &fonts {
            Some(fonts) => Box::new(FontdueMetrics::new(Rc::clone(fonts))),
            None => Box::new(ApproximateFontMetrics),
        };
        let mut browser = Self::with_services(config, metrics, ImageCache::new());
        browser.fonts = fonts;
        browser
    }

    /// A browser with explicit services, for embedding and tests.
    #[must_use]
    pub fn with_services(
        config: BrowserConfig,
        metrics: Box<dyn TextMeasurer>,
        images: ImageCache,
    ) -> Self {
        Self {
            viewport: Viewport::new(config.width, config.height),
            config,
            history: History::new(),
            images,
            metrics,
            fonts: None,
            page: None,
        }
    }

    /// Load `url` and show it.
    ///
    /// On failure the error page is shown and the error is also returned so
    /// the host can report it.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] that replaced the document.
    pub fn navigate(&mut self, url: &str) -> Result<(), LoadError> {
        clear_warnings();
        match load_source(url) {
            Ok(html) => self.load_html(&html, Some(url)),
            Err(e) => {
                self.show(error_dom(url, &e), None);
                Err(e)
            }
        }
    }

    /// Show in-memory markup as a new history entry.
    ///
    /// Markup that cannot be parsed is replaced by an error page.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Markup`] when the error page was shown instead.
    pub fn load_html(&mut self, html: &str, base_url: Option<&str>) -> Result<(), LoadError> {
        match parse_document(html) {
            Ok(dom) => {
                self.show(dom, base_url.map(str::to_string));
                Ok(())
            }
            Err(e) => {
                let e = LoadError::from(e);
                self.show(error_dom(base_url.unwrap_or("about:blank"), &e), None);
                Err(e)
            }
        }
    }

    fn show(&mut self, dom: DomTree, base_url: Option<String>) {
        self.history.push(Rc::new(dom), base_url);
        self.render_current();
    }

    /// Style and lay out the current history entry.
    fn render_current(&mut self) {
        let Some(entry) = self.history.current() else {
            self.page = None;
            return;
        };
        let dom = Rc::clone(&entry.dom);
        let cssom = Cssom::with_user_agent(&extract_stylesheets(&dom));
        self.page = Some(Page {
            styles: compute_styles(&dom, &cssom),
            base_url: entry.base_url.clone(),
            dom,
            layout: None,
        });
        self.relayout();
    }

    fn relayout(&mut self) {
        let Some(page) = self.page.as_mut() else {
            return;
        };
        let ctx = LayoutContext {
            tree: page.dom.as_ref(),
            styles: &page.styles,
            base_url: page.base_url.as_deref(),
            text: self.metrics.as_ref(),
            images: &self.images,
        };
        page.layout = layout_document(&ctx, self.viewport.width);
    }

    /// Change the viewport size. Layout is redone only when the width
    /// changes; returns whether it was.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.viewport.height = height;
        if (self.viewport.width - width).abs() < f32::EPSILON {
            return false;
        }
        self.viewport.width = width;
        self.relayout();
        true
    }

    /// Scroll the viewport to `(x, y)`.
    pub const fn scroll_to(&mut self, x: f32, y: f32) {
        self.viewport.scroll_x = x;
        self.viewport.scroll_y = y;
    }

    /// Go back one history entry. `false` if there was none.
    pub fn back(&mut self) -> bool {
        if self.history.back().is_none() {
            return false;
        }
        self.render_current();
        true
    }

    /// Go forward one history entry. `false` if there was none.
    pub fn forward(&mut self) -> bool {
        if self.history.forward().is_none() {
            return false;
        }
        self.render_current();
        true
    }

    /// The node under viewport point `(x, y)`.
    #[must_use]
    pub fn node_at(&self, x: f32, y: f32) -> Option<NodeId> {
        let root = self.layout()?;
        find_node_at(
            root,
            x + self.viewport.scroll_x,
            y + self.viewport.scroll_y,
        )
    }

    /// The link target under viewport point `(x, y)`, resolved against the
    /// page's base URL.
    ///
    /// The host decides whether to [`navigate`](Self::navigate) to it.
    #[must_use]
    pub fn click(&self, x: f32, y: f32) -> Option<String> {
        let page = self.page.as_ref()?;
        let node = self.node_at(x, y)?;
        let href = bubble_for_link(&page.dom, node)?;
        Some(resolve_url(&href, page.base_url.as_deref()))
    }

    /// Pick up finished image fetches; if any arrived, lay out again.
    ///
    /// Returns whether layout changed, i.e. whether the host should repaint.
    pub fn poll_images(&mut self) -> bool {
        if self.images.drain() == 0 {
            return false;
        }
        self.relayout();
        true
    }

    /// Wait for every outstanding image fetch, then lay out again.
    ///
    /// For one-shot hosts that have no later frame.
    pub fn wait_for_images(&mut self) -> bool {
        if self.images.wait_for_pending() == 0 {
            return false;
        }
        self.relayout();
        true
    }

    /// Paint the current page onto `surface`.
    pub fn paint(&self, surface: &mut dyn DrawingSurface) {
        if let Some(root) = self.layout() {
            paint(root, surface, self.metrics.as_ref(), self.viewport);
        }
    }

    /// Paint the current page onto a fresh canvas the size of the viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if the viewport has zero area.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rasterize(&self) -> anyhow::Result<Renderer> {
        let mut renderer = Renderer::new(
            self.viewport.width.round() as u32,
            self.viewport.height.round() as u32,
            self.fonts.clone(),
        )?;
        self.paint(&mut renderer);
        Ok(renderer)
    }

    /// The current document.
    #[must_use]
    pub fn dom(&self) -> Option<&DomTree> {
        self.page.as_ref().map(|page| page.dom.as_ref())
    }

    /// Computed styles of the current document.
    #[must_use]
    pub fn styles(&self) -> Option<&StyleMap> {
        self.page.as_ref().map(|page| &page.styles)
    }

    /// The current layout tree.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutBox> {
        self.page.as_ref()?.layout.as_ref()
    }

    /// Base URL of the current document.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.page.as_ref()?.base_url.as_deref()
    }

    /// Width of the laid-out content, for sizing a horizontal scroll area.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        self.layout().map_or(0.0, content_width)
    }

    /// Session history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// The current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The configuration the browser was created with.
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// The text measurer layout and paint use.
    #[must_use]
    pub fn metrics(&self) -> &dyn TextMeasurer {
        self.metrics.as_ref()
    }

    /// The image cache layout loads through.
    #[must_use]
    pub const fn images(&self) -> &ImageCache {
        &self.images
    }
}

/// Parse the error page for `url`; it is static markup and always parses.
fn error_dom(url: &str, error: &LoadError) -> DomTree {
    parse_document(&error_page(url, error)).unwrap_or_default()
}
