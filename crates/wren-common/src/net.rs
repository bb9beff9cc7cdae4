//! HTTP fetch utilities for the Wren engine hosts.
//!
//! Provides simple blocking HTTP GET wrappers used by the document loader and
//! the image fetch threads, plus `data:` URL decoding.
//!
//! The engine itself never calls into this module during layout; only hosts
//! (and the image cache's background threads) do.
use base64::Engine;
use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("Wren/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failures while fetching or decoding a resource.
#[derive(Debug, Error)]
pub enum NetError {
    /// The HTTP client could not be built or the request failed in transit.
    #[error("request to '{url}' failed: {source}")]
    Request {
        /// The URL being fetched.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for '{url}'")]
    Status {
        /// The URL being fetched.
        url: String,
        /// The status code returned.
        status: u16,
    },
    /// A `data:` URL without the `,` separating metadata from payload.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// A `data:` URL whose base64 payload does not decode.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A parsed `data:` URL that can be decoded into raw bytes.
///
/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type and parameters, e.g. `image/png;base64`.
    pub metadata: &'a str,
    /// Everything after the first comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a `data:` URL into metadata and payload.
    ///
    /// # Errors
    ///
    /// Returns [`NetError::MissingComma`] when there is no payload separator.
    pub fn parse(url: &'a str) -> Result<Self, NetError> {
        let body = url.strip_prefix("data:").unwrap_or(url);
        let (metadata, payload) = body.split_once(',').ok_or(NetError::MissingComma)?;
        Ok(Self { metadata, payload })
    }

    /// Whether the payload is base64-encoded.
    #[must_use]
    pub fn is_base64(&self) -> bool {
        self.metadata.ends_with(";base64")
    }

    /// Decode the payload into raw bytes.
    ///
    /// Non-base64 payloads are returned as their UTF-8 bytes (percent-encoding
    /// is not undone).
    ///
    /// # Errors
    ///
    /// Returns [`NetError::Base64`] if base64 decoding fails.
    pub fn decode(&self) -> Result<Vec<u8>, NetError> {
        if self.is_base64() {
            decode_base64(self.payload)
        } else {
            Ok(self.payload.as_bytes().to_vec())
        }
    }
}

/// Decode a standard base64 string, ignoring embedded ASCII whitespace.
///
/// # Errors
///
/// Returns [`NetError::Base64`] if the input is not valid base64.
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, NetError> {
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(base64::engine::general_purpose::STANDARD.decode(compact)?)
}

fn client(url: &str) -> Result<reqwest::blocking::Client, NetError> {
    reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|source| NetError::Request {
            url: url.to_string(),
            source,
        })
}

fn get(url: &str) -> Result<reqwest::blocking::Response, NetError> {
    let response = client(url)?
        .get(url)
        .send()
        .map_err(|source| NetError::Request {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(NetError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    Ok(response)
}

/// Fetch a URL and return its body as text.
///
/// # Errors
///
/// Returns an error if the request fails, the response has a non-success
/// status, or the body cannot be decoded.
pub fn fetch_text(url: &str) -> Result<String, NetError> {
    get(url)?.text().map_err(|source| NetError::Request {
        url: url.to_string(),
        source,
    })
}

/// Fetch a URL and return its body as raw bytes.
///
/// # Errors
///
/// Returns an error if the request fails, the response has a non-success
/// status, or the body cannot be read.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, NetError> {
    get(url)?
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|source| NetError::Request {
            url: url.to_string(),
            source,
        })
}
