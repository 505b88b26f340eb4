//! Request-line parsing.
//!
//! Only the first line of a request is consumed. Everything after it
//! (headers, body) is deliberately ignored: dispatch needs nothing beyond
//! the method and the request-target.

use std::str;

use thiserror::Error;

use super::Method;

/// Errors that can occur while parsing a request line.
#[derive(Debug, Error)]
pub enum RequestLineError {
    #[error("request line is not valid UTF-8: {0}")]
    Encoding(#[from] str::Utf8Error),

    #[error("malformed request line: {reason}")]
    Malformed { reason: &'static str },
}

/// The first line of an HTTP request: method, request-target, version.
///
/// Created by [`RequestLine::parse`] from a raw byte buffer. The buffer may
/// be a truncated prefix of what the client sent; as long as the first line
/// survived the truncation, parsing succeeds.
///
/// # Examples
///
/// ```
/// use tinyserve::http::{Method, RequestLine};
///
/// let line = RequestLine::parse(b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
///
/// assert_eq!(*line.method(), Method::Get);
/// assert_eq!(line.target(), "/index.html");
/// assert_eq!(line.version(), "HTTP/1.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: Method,
    target: String,
    version: String,
}

impl RequestLine {
    /// Parses the request line from the start of a raw request buffer.
    ///
    /// The line is bounded at the first CR or LF, or at the end of the
    /// buffer if no line terminator arrived. It must carry three
    /// space-separated tokens; the version token is captured verbatim and
    /// not validated.
    ///
    /// # Errors
    ///
    /// - [`RequestLineError::Encoding`] — the line is not valid UTF-8.
    /// - [`RequestLineError::Malformed`] — a method or request-target token
    ///   is missing or empty.
    pub fn parse(buf: &[u8]) -> Result<Self, RequestLineError> {
        let line_end = buf
            .iter()
            .position(|&b| b == b'\r' || b == b'\n')
            .unwrap_or(buf.len());
        let line = str::from_utf8(&buf[..line_end])?;

        let (method, rest) = line.split_once(' ').ok_or(RequestLineError::Malformed {
            reason: "missing request target",
        })?;
        let (target, version) = rest.split_once(' ').ok_or(RequestLineError::Malformed {
            reason: "missing version token",
        })?;

        if method.is_empty() {
            return Err(RequestLineError::Malformed {
                reason: "empty method token",
            });
        }
        if target.is_empty() {
            return Err(RequestLineError::Malformed {
                reason: "empty request target",
            });
        }

        let method: Method = method.parse().unwrap(); // Infallible

        Ok(Self {
            method,
            target: target.to_owned(),
            version: version.to_owned(),
        })
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request-target exactly as the client sent it, query
    /// string and all.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the unvalidated version token.
    pub fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let line = RequestLine::parse(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n").unwrap();
        assert_eq!(*line.method(), Method::Get);
        assert_eq!(line.target(), "/");
        assert_eq!(line.version(), "HTTP/1.1");
    }

    #[test]
    fn parse_head() {
        let line = RequestLine::parse(b"HEAD /index.html HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(*line.method(), Method::Head);
        assert_eq!(line.target(), "/index.html");
    }

    #[test]
    fn query_string_stays_in_target() {
        let line = RequestLine::parse(b"GET /?page=2 HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(line.target(), "/?page=2");
    }

    #[test]
    fn unknown_method_parses() {
        let line = RequestLine::parse(b"PURGE / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(*line.method(), Method::Custom("PURGE".to_owned()));
    }

    #[test]
    fn bare_lf_line_ending() {
        let line = RequestLine::parse(b"GET / HTTP/1.1\nHost: localhost\n\n").unwrap();
        assert_eq!(line.target(), "/");
    }

    #[test]
    fn line_without_terminator() {
        // A truncated buffer may cut the request off mid-headers; the first
        // line still parses.
        let line = RequestLine::parse(b"GET / HTTP/1.1").unwrap();
        assert_eq!(line.target(), "/");
    }

    #[test]
    fn no_spaces_is_malformed() {
        assert!(matches!(
            RequestLine::parse(b"GARBAGE\r\n"),
            Err(RequestLineError::Malformed { .. })
        ));
    }

    #[test]
    fn one_space_is_malformed() {
        assert!(matches!(
            RequestLine::parse(b"GET /\r\n"),
            Err(RequestLineError::Malformed { .. })
        ));
    }

    #[test]
    fn empty_buffer_is_malformed() {
        assert!(matches!(
            RequestLine::parse(b""),
            Err(RequestLineError::Malformed { .. })
        ));
    }

    #[test]
    fn leading_space_is_malformed() {
        assert!(matches!(
            RequestLine::parse(b" / HTTP/1.1\r\n"),
            Err(RequestLineError::Malformed { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(matches!(
            RequestLine::parse(b"\xff\xfe /\x80 HTTP/1.1\r\n"),
            Err(RequestLineError::Encoding(_))
        ));
    }
}
