//! Fixed-route dispatch on the request line.
//!
//! There is no routing table: the route set is two literal home-page paths
//! plus the fallbacks. Matching is exact-string, so trailing slashes,
//! prefixes, and query strings all miss.

use crate::http::Method;

/// Paths that resolve to the home page.
const HOME_TARGETS: [&str; 2] = ["/", "/index.html"];

/// The router's verdict for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Serve the home page with 200.
    Home,
    /// Serve the 404 page.
    NotFound,
    /// Serve the 405 page; the method is not GET or HEAD.
    MethodNotAllowed,
}

/// Maps a (method, request-target) pair to a [`RouteOutcome`].
///
/// GET and HEAD are routed identically; whether the response body is
/// transmitted is decided later, when the response is assembled.
///
/// # Examples
///
/// ```
/// use tinyserve::http::Method;
/// use tinyserve::router::{route, RouteOutcome};
///
/// assert_eq!(route(&Method::Get, "/"), RouteOutcome::Home);
/// assert_eq!(route(&Method::Head, "/index.html"), RouteOutcome::Home);
/// assert_eq!(route(&Method::Get, "/missing.html"), RouteOutcome::NotFound);
/// assert_eq!(route(&Method::Post, "/"), RouteOutcome::MethodNotAllowed);
/// ```
pub fn route(method: &Method, target: &str) -> RouteOutcome {
    match method {
        Method::Get | Method::Head if HOME_TARGETS.contains(&target) => RouteOutcome::Home,
        Method::Get | Method::Head => RouteOutcome::NotFound,
        _ => RouteOutcome::MethodNotAllowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_home_targets() {
        assert_eq!(route(&Method::Get, "/"), RouteOutcome::Home);
        assert_eq!(route(&Method::Get, "/index.html"), RouteOutcome::Home);
    }

    #[test]
    fn head_home_targets() {
        assert_eq!(route(&Method::Head, "/"), RouteOutcome::Home);
        assert_eq!(route(&Method::Head, "/index.html"), RouteOutcome::Home);
    }

    #[test]
    fn unknown_targets_are_not_found() {
        assert_eq!(route(&Method::Get, "/missing.html"), RouteOutcome::NotFound);
        assert_eq!(route(&Method::Head, "/about"), RouteOutcome::NotFound);
    }

    #[test]
    fn matching_is_exact() {
        assert_eq!(route(&Method::Get, "/index.html/"), RouteOutcome::NotFound);
        assert_eq!(route(&Method::Get, "//"), RouteOutcome::NotFound);
        assert_eq!(route(&Method::Get, "/INDEX.HTML"), RouteOutcome::NotFound);
    }

    #[test]
    fn query_strings_never_match() {
        assert_eq!(route(&Method::Get, "/?page=2"), RouteOutcome::NotFound);
        assert_eq!(
            route(&Method::Get, "/index.html?x=1"),
            RouteOutcome::NotFound
        );
    }

    #[test]
    fn other_methods_are_rejected() {
        assert_eq!(route(&Method::Post, "/"), RouteOutcome::MethodNotAllowed);
        assert_eq!(route(&Method::Delete, "/"), RouteOutcome::MethodNotAllowed);
        assert_eq!(
            route(&Method::Custom("PURGE".to_owned()), "/index.html"),
            RouteOutcome::MethodNotAllowed
        );
    }

    #[test]
    fn rejection_ignores_target() {
        // Method is checked before the target, so even a home-page target
        // with the wrong method is a 405, not a 404.
        assert_eq!(
            route(&Method::Post, "/missing.html"),
            RouteOutcome::MethodNotAllowed
        );
    }
}
