//! Font embedding for exported documents.
//!
//! Each font-face rule has its source URL swapped for a base64 data URI so
//! the exported SVG renders with the right font offline. A font that cannot
//! be fetched is skipped; text then falls back to the unembedded family.

use crate::element::Element;
use base64::{Engine, engine::general_purpose::STANDARD};
use pinmark_core::config::FontFaceConfig;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Font fetching errors.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),
    #[error("Fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for font operations.
pub type FontResult<T> = Result<T, FontError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Source of font file bytes.
pub trait FontFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, FontResult<Vec<u8>>>;
}

/// Serves font files registered up front. Useful offline and in tests.
#[derive(Debug, Default)]
pub struct MemoryFontFetcher {
    fonts: HashMap<String, Vec<u8>>,
}

impl MemoryFontFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.fonts.insert(url.into(), bytes);
    }
}

impl FontFetcher for MemoryFontFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, FontResult<Vec<u8>>> {
        Box::pin(async move {
            self.fonts
                .get(url)
                .cloned()
                .ok_or_else(|| FontError::NotFound(url.to_string()))
        })
    }
}

/// Fetches font files over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFontFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFontFetcher {
    pub fn new() -> FontResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
impl FontFetcher for HttpFontFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, FontResult<Vec<u8>>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FontError::Fetch {
                    url: url.to_string(),
                    reason: format!("HTTP {status}"),
                });
            }
            Ok(response.bytes().await?.to_vec())
        })
    }
}

/// Media type for a font URL, from its extension.
pub fn font_mime(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "woff2" => "font/woff2",
        "woff" => "font/woff",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        _ => "application/octet-stream",
    }
}

/// Font-face rule with its source URL replaced by an inline data URI.
pub fn embed_face_rule(face: &FontFaceConfig, bytes: &[u8]) -> String {
    let data_uri = format!("data:{};base64,{}", font_mime(&face.url), STANDARD.encode(bytes));
    face.face_rule.replace(&face.url, &data_uri)
}

/// Key identifying a font definition within one export.
pub fn font_def_key(face: &FontFaceConfig) -> String {
    format!("font:{}", face.family.key())
}

/// Fetch a face and build its `<style>` definition, or `None` if the font
/// could not be fetched.
pub async fn font_style_element(face: &FontFaceConfig, fetcher: &dyn FontFetcher) -> Option<Element> {
    match fetcher.fetch(&face.url).await {
        Ok(bytes) => {
            log::debug!("Embedding {} ({} bytes)", font_def_key(face), bytes.len());
            Some(Element::new("style").text(embed_face_rule(face, &bytes)))
        }
        Err(e) => {
            log::warn!("Skipping font {}: {}", font_def_key(face), e);
            None
        }
    }
}
