//! Response body sourcing.
//!
//! The router decides *which* page answers a request; a [`ContentProvider`]
//! decides where that page's bytes come from. Two providers ship with the
//! crate: [`FsContent`] re-reads HTML files from a directory on every call,
//! [`StaticContent`] serves literals built once at construction. Swapping
//! one for the other never touches the router or the server loop.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use bytes::Bytes;

/// The pages this server can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// The home page, served for `/` and `/index.html`.
    Home,
    /// The body of a 404 response.
    NotFound,
    /// The body of a 405 response.
    MethodNotAllowed,
}

impl Page {
    /// File name of this page's asset within a content directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::NotFound => "404-page.html",
            Self::MethodNotAllowed => "405-page.html",
        }
    }
}

/// A source of page bodies.
pub trait ContentProvider: Send + Sync {
    /// Loads the body for `page`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing asset cannot be produced; the
    /// server answers such failures with a 500 response.
    fn load(&self, page: Page) -> impl Future<Output = io::Result<Bytes>> + Send;
}

/// File-backed content: each call re-reads the page's HTML file from a
/// directory, so pages stay editable while the server runs. Nothing is
/// cached.
#[derive(Debug, Clone)]
pub struct FsContent {
    dir: PathBuf,
}

impl FsContent {
    /// Creates a provider rooted at `dir`.
    ///
    /// The directory is expected to contain `index.html`, `404-page.html`,
    /// and `405-page.html`; a missing file surfaces as an error from
    /// [`load`](ContentProvider::load), not from this constructor.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ContentProvider for FsContent {
    async fn load(&self, page: Page) -> io::Result<Bytes> {
        let bytes = tokio::fs::read(self.dir.join(page.file_name())).await?;
        Ok(Bytes::from(bytes))
    }
}

/// Embedded content: three literal bodies held in memory, built once at
/// construction and reused for every response. No filesystem access.
#[derive(Debug, Clone)]
pub struct StaticContent {
    home: Bytes,
    not_found: Bytes,
    method_not_allowed: Bytes,
}

impl StaticContent {
    /// Creates a provider from three literal page bodies.
    pub fn new(
        home: impl Into<Bytes>,
        not_found: impl Into<Bytes>,
        method_not_allowed: impl Into<Bytes>,
    ) -> Self {
        Self {
            home: home.into(),
            not_found: not_found.into(),
            method_not_allowed: method_not_allowed.into(),
        }
    }
}

impl Default for StaticContent {
    fn default() -> Self {
        Self::new(
            "<!DOCTYPE html><html><head><title>tinyserve</title></head>\
             <body><h1>Hello from tinyserve</h1></body></html>",
            "<!DOCTYPE html><html><head><title>Not Found</title></head>\
             <body><h1>404: there is nothing at this address</h1></body></html>",
            "<!DOCTYPE html><html><head><title>Method Not Allowed</title></head>\
             <body><h1>405: only GET and HEAD are supported</h1></body></html>",
        )
    }
}

impl ContentProvider for StaticContent {
    async fn load(&self, page: Page) -> io::Result<Bytes> {
        let body = match page {
            Page::Home => &self.home,
            Page::NotFound => &self.not_found,
            Page::MethodNotAllowed => &self.method_not_allowed,
        };
        Ok(body.clone())
    }
}
