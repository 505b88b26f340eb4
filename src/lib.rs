//! # tinyserve
//!
//! A minimal HTTP/1.1 page server built directly on TCP streams.
//!
//! tinyserve owns the whole request lifecycle: it binds and listens, accepts
//! one connection at a time, reads a single bounded buffer, parses the
//! request line, routes on method and request-target, assembles a response
//! for one of its fixed pages (home, 404, 405), writes it back, and closes
//! the connection. Page bodies come from a pluggable [`ContentProvider`]:
//! load them from disk with [`FsContent`] or embed them with
//! [`StaticContent`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tinyserve::{Server, ServerConfig, StaticContent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let server = Server::bind(&config, StaticContent::default()).await?;
//!     println!("Listening on http://{}", server.local_addr());
//!     server.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod content;
pub mod http;
pub mod router;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use content::{ContentProvider, FsContent, Page, StaticContent};
pub use http::{Headers, Method, RequestLine, Response, StatusCode};
pub use router::{RouteOutcome, route};
pub use server::{Phase, Server, ServerError};
