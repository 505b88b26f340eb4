//! Sequential TCP server loop using Tokio.
//!
//! Accepts connections one at a time and walks each through the request
//! lifecycle: read, parse, route, build, write, close. Every connection
//! carries exactly one request/response exchange; there is no keep-alive
//! and no per-connection task, so connections are served strictly in
//! accept order while the OS queues a short backlog of pending ones.

use std::io;
use std::net::SocketAddr;

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::content::{ContentProvider, Page};
use crate::http::{Method, RequestLine, Response, StatusCode};
use crate::router::{self, RouteOutcome};

/// Errors produced by the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid bind address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },
}

/// Connections the OS queues while the loop is busy with an earlier one.
const BACKLOG: u32 = 20;

/// Upper bound on how much of a request we read. A single read call fills
/// the buffer at most this far; anything the client sends beyond it is
/// ignored, and parsing proceeds on the truncated prefix.
pub const MAX_REQUEST_BYTES: usize = 30 * 1024;

/// Stages of one connection's request/response exchange, in order.
///
/// The server loop advances through these as it works a connection, and
/// records the current phase on its log lines, so a stalled or failed
/// exchange shows exactly where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Reading,
    Parsing,
    Routing,
    Building,
    Writing,
    Closing,
}

impl Phase {
    /// The stage that follows this one. `Closing` is terminal and returns
    /// itself.
    pub fn advance(self) -> Phase {
        match self {
            Self::Reading => Self::Parsing,
            Self::Parsing => Self::Routing,
            Self::Routing => Self::Building,
            Self::Building => Self::Writing,
            Self::Writing => Self::Closing,
            Self::Closing => Self::Closing,
        }
    }
}

/// The tinyserve HTTP server.
///
/// Binds to a TCP address and answers each connection with one of its fixed
/// pages, sourced from a [`ContentProvider`].
///
/// # Examples
///
/// ```rust,no_run
/// use tinyserve::{Server, ServerConfig, StaticContent};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ServerConfig::default();
///     let server = Server::bind(&config, StaticContent::default()).await?;
///     server.run().await?;
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Server<P> {
    listener: TcpListener,
    local_addr: SocketAddr,
    content: P,
}

impl<P: ContentProvider> Server<P> {
    /// Binds the server to the address named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidAddress`] if the configured host does
    /// not parse as an IP address, or [`ServerError::Bind`] if the address
    /// cannot be bound (e.g. port already in use, insufficient
    /// permissions).
    pub async fn bind(config: &ServerConfig, content: P) -> Result<Self, ServerError> {
        let addr = config
            .socket_addr()
            .map_err(|e| ServerError::InvalidAddress {
                addr: config.address(),
                source: e,
            })?;

        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.bind(addr).map_err(|e| ServerError::Bind {
            addr: config.address(),
            source: e,
        })?;
        let listener = socket.listen(BACKLOG).map_err(|e| ServerError::Bind {
            addr: config.address(),
            source: e,
        })?;

        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
            content,
        })
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Starts accepting connections and serving them, one at a time.
    ///
    /// A second client is not accepted until the previous connection's full
    /// request/response exchange has completed and its handle is dropped.
    /// Failed accepts and failed exchanges are logged and the loop
    /// continues with the next connection.
    ///
    /// This method runs until the process is terminated.
    pub async fn run(self) -> Result<(), ServerError> {
        info!(address = %self.local_addr, "tinyserve listening");

        loop {
            debug!("waiting for a connection");
            let (stream, peer_addr) = match self.listener.accept().await {
                Ok(pair) => pair,
                Err(e) => {
                    error!(error = %e, "failed to accept connection");
                    continue;
                }
            };

            debug!(peer = %peer_addr, "connection accepted");
            if let Err(e) = self.handle_connection(stream, peer_addr).await {
                warn!(peer = %peer_addr, error = %e, "connection closed with error");
            }
        }
    }

    /// Works one connection through the request lifecycle.
    ///
    /// The stream is dropped (and the connection closed) when this returns,
    /// success or not.
    async fn handle_connection(&self, mut stream: TcpStream, peer: SocketAddr) -> io::Result<()> {
        let mut phase = Phase::Reading;
        debug!(peer = %peer, phase = ?phase, "reading request");

        // Exactly one read. A request larger than the buffer is silently
        // truncated; the request line at the front still parses.
        let mut buf = BytesMut::with_capacity(MAX_REQUEST_BYTES);
        let bytes_read = stream.read_buf(&mut buf).await?;
        if bytes_read == 0 {
            debug!(peer = %peer, "connection closed before any data arrived");
            return Ok(());
        }

        phase = phase.advance();
        debug!(peer = %peer, phase = ?phase, bytes = bytes_read, "request received");

        let response = match RequestLine::parse(&buf) {
            Ok(request_line) => {
                phase = phase.advance();
                debug!(
                    peer = %peer,
                    phase = ?phase,
                    method = %request_line.method(),
                    target = %request_line.target(),
                    "dispatching request"
                );
                let outcome = router::route(request_line.method(), request_line.target());
                let include_body = *request_line.method() != Method::Head;

                phase = phase.advance();
                debug!(peer = %peer, phase = ?phase, outcome = ?outcome, "building response");
                page_response(&self.content, outcome, include_body).await
            }
            Err(e) => {
                warn!(peer = %peer, error = %e, "malformed request line");
                phase = Phase::Building;
                debug!(peer = %peer, phase = ?phase, "building 400 response");
                Response::new(StatusCode::BadRequest).body(format!("Bad Request: {e}"))
            }
        };

        phase = Phase::Writing;
        let bytes = response.into_bytes();
        let written = stream.write(&bytes).await?;
        if written == bytes.len() {
            debug!(peer = %peer, phase = ?phase, bytes = written, "response sent");
        } else {
            warn!(
                peer = %peer,
                phase = ?phase,
                expected = bytes.len(),
                written,
                "short write, closing connection anyway"
            );
        }
        stream.flush().await?;

        phase = phase.advance();
        debug!(peer = %peer, phase = ?phase, "closing connection");
        Ok(())
    }
}

/// Assembles the response for a routing outcome.
///
/// The page body comes from the provider; a provider failure is answered
/// with a 500 response rather than surfacing to the connection loop. When
/// `include_body` is false (HEAD requests) the response advertises the
/// body's length without carrying it.
async fn page_response<P: ContentProvider>(
    content: &P,
    outcome: RouteOutcome,
    include_body: bool,
) -> Response {
    let (status, page) = match outcome {
        RouteOutcome::Home => (StatusCode::Ok, Page::Home),
        RouteOutcome::NotFound => (StatusCode::NotFound, Page::NotFound),
        RouteOutcome::MethodNotAllowed => (StatusCode::MethodNotAllowed, Page::MethodNotAllowed),
    };

    let mut response = match content.load(page).await {
        Ok(body) => {
            let mut response = Response::new(status)
                .header("Content-Type", "text/html")
                .body_bytes(body);
            if outcome == RouteOutcome::MethodNotAllowed {
                response = response.header("Allow", "GET, HEAD");
            }
            response
        }
        Err(e) => {
            error!(page = ?page, error = %e, "failed to load page content");
            Response::new(StatusCode::InternalServerError).body("Internal Server Error")
        }
    };

    if !include_body {
        response = response.omit_body();
    }
    response
}
