//! Image loading for the host: decode, cache and background fetch.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! Layout asks through [`ImageService`]. Local files and `data:` payloads are
//! decoded on the spot. Network images come from the cache; a miss starts one
//! fetch thread per URL, whose result travels back over a channel until the
//! host calls [`ImageCache::drain`] and lays the page out again.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use thiserror::Error;
use wren_common::image::LoadedImage;
use wren_common::net::{NetError, decode_base64, fetch_bytes};
use wren_common::warning::warn_once;
use wren_css::ImageService;

/// Why an image could not be produced.
#[derive(Debug, Error)]
pub enum ImageError {
    /// A local file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// The path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Fetch or base64 failure.
    #[error(transparent)]
    Net(#[from] NetError),
    /// The bytes are not an image the `image` crate understands.
    #[error("could not decode image ({0})")]
    Decode(#[from] image::ImageError),
}

/// Signature of the function fetch threads call.
pub type Fetcher = fn(&str) -> Result<Vec<u8>, NetError>;

type FetchResult = (String, Result<LoadedImage, ImageError>);

/// Decode raster bytes (PNG, JPEG, GIF) into RGBA pixels.
///
/// # Errors
///
/// Returns [`ImageError::Decode`] if the format is unknown or corrupt.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage, ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage::new(width, height, rgba.into_raw()))
}

/// Strip query string (`?…`) and fragment (`#…`) so a URL can be used as a
/// filesystem path.
///
/// [URL Standard § 4.1](https://url.spec.whatwg.org/#concept-url-path)
#[must_use]
pub fn strip_url_decorations(resolved: &str) -> &str {
    let without_fragment = resolved.split_once('#').map_or(resolved, |(b, _)| b);
    without_fragment
        .split_once('?')
        .map_or(without_fragment, |(b, _)| b)
}

/// The host's [`ImageService`].
pub struct ImageCache {
    /// Decoded images keyed by resolved URL or local path.
    images: RefCell<HashMap<String, Rc<LoadedImage>>>,
    /// URLs with a fetch thread in flight.
    pending: RefCell<HashSet<String>>,
    /// URLs whose fetch or decode failed; never requested again.
    failed: RefCell<HashSet<String>>,
    sender: Sender<FetchResult>,
    receiver: Receiver<FetchResult>,
    fetcher: Fetcher,
}

impl ImageCache {
    /// A cache that fetches over HTTP(S).
    #[must_use]
    pub fn new() -> Self {
        Self::with_fetcher(fetch_bytes)
    }

    /// A cache whose fetch threads call `fetcher` instead of the network.
    #[must_use]
    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            images: RefCell::new(HashMap::new()),
            pending: RefCell::new(HashSet::new()),
            failed: RefCell::new(HashSet::new()),
            sender,
            receiver,
            fetcher,
        }
    }

    /// Put an already decoded image under `url`.
    pub fn insert(&self, url: &str, image: LoadedImage) {
        let _ = self
            .images
            .borrow_mut()
            .insert(url.to_string(), Rc::new(image));
    }

    /// Move every finished fetch into the cache.
    ///
    /// Returns how many new images arrived; a non-zero count means layout is
    /// stale. Failures are reported once and remembered.
    pub fn drain(&self) -> usize {
        self.receiver
            .try_iter()
            .map(|(url, result)| self.accept(url, result))
            .filter(|&arrived| arrived)
            .count()
    }

    /// Block until every pending fetch completes, then report how many
    /// images arrived.
    ///
    /// Used by one-shot hosts such as the CLI, which have no later frame to
    /// pick the images up in.
    pub fn wait_for_pending(&self) -> usize {
        let mut arrived = 0;
        while self.pending_count() > 0 {
            let Ok((url, result)) = self.receiver.recv() else {
                break;
            };
            if self.accept(url, result) {
                arrived += 1;
            }
        }
        arrived
    }

    /// Record one fetch outcome. `true` if an image was cached.
    fn accept(&self, url: String, result: Result<LoadedImage, ImageError>) -> bool {
        let _ = self.pending.borrow_mut().remove(&url);
        match result {
            Ok(image) => {
                self.insert(&url, image);
                true
            }
            Err(e) => {
                warn_once("image", &format!("could not load '{url}': {e}"));
                let _ = self.failed.borrow_mut().insert(url);
                false
            }
        }
    }

    /// Number of fetches still in flight.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of decoded images held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.borrow().len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.borrow().is_empty()
    }

    fn report(what: &str, result: Result<LoadedImage, ImageError>) -> Option<LoadedImage> {
        result
            .map_err(|e| warn_once("image", &format!("could not load {what}: {e}")))
            .ok()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageService for ImageCache {
    fn load_local(&self, path: &str) -> Option<Rc<LoadedImage>> {
        let path = strip_url_decorations(path);
        if let Some(image) = self.images.borrow().get(path) {
            return Some(Rc::clone(image));
        }

        let result = fs::read(path)
            .map_err(|source| ImageError::Io {
                path: path.to_string(),
                source,
            })
            .and_then(|bytes| decode_image(&bytes));
        let image = Rc::new(Self::report(&format!("'{path}'"), result)?);
        let _ = self
            .images
            .borrow_mut()
            .insert(path.to_string(), Rc::clone(&image));
        Some(image)
    }

    fn decode_base64(&self, payload: &str) -> Option<Rc<LoadedImage>> {
        let result = decode_base64(payload)
            .map_err(ImageError::from)
            .and_then(|bytes| decode_image(&bytes));
        Self::report("inline data", result).map(Rc::new)
    }

    fn cached(&self, url: &str) -> Option<Rc<LoadedImage>> {
        self.images.borrow().get(url).map(Rc::clone)
    }

    fn request_fetch(&self, url: &str) {
        if self.failed.borrow().contains(url) || !self.pending.borrow_mut().insert(url.to_string())
        {
            return;
        }

        let sender = self.sender.clone();
        let fetcher = self.fetcher;
        let url = url.to_string();
        // The handle is dropped; the thread reports through the channel.
        let _ = thread::spawn(move || {
            let result = fetcher(&url)
                .map_err(ImageError::from)
                .and_then(|bytes| decode_image(&bytes));
            // The receiver is gone only when the cache was dropped.
            let _ = sender.send((url, result));
        });
    }
}
