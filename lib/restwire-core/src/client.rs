//! HTTP client traits.
//!
//! - [`HttpClient`] - Low-level HTTP execution
//! - [`Transport`] - An [`HttpClient`] that may carry a base URL, what a REST client dispatches through
//!
//! Implement [`Transport`] directly for custom transports or test doubles.

use std::future::Future;
use std::sync::Arc;

use url::Url;

use crate::{Error, Request, Response, Result};

/// Core HTTP client trait.
///
/// Executes one request into a fully buffered response. Implementations
/// should be async-first and support connection pooling.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// A non-2xx status is NOT an error at this level.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid response
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response>> + Send;
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response>> + Send {
        (**self).execute(request)
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// An [`HttpClient`] with an optional base URL.
///
/// Relative request paths are resolved against [`Transport::base_url`].
///
/// # Example
///
/// ```ignore
/// use restwire_core::{HttpClient, Request, Response, Result, StatusCode, Transport};
/// use url::Url;
///
/// #[derive(Clone)]
/// struct StubTransport {
///     base_url: Url,
/// }
///
/// impl HttpClient for StubTransport {
///     async fn execute(&self, request: Request) -> Result<Response> {
///         Ok(Response::new(StatusCode::NO_CONTENT, ""))
///     }
/// }
///
/// impl Transport for StubTransport {
///     fn base_url(&self) -> Option<&Url> {
///         Some(&self.base_url)
///     }
/// }
/// ```
pub trait Transport: HttpClient {
    /// Base URL for relative paths, if any.
    fn base_url(&self) -> Option<&Url>;

    /// Resolve a path (optionally with a query) into a full URL.
    ///
    /// Without a base URL the path must already be an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the result is not a valid URL.
    fn resolve(&self, path: &str) -> Result<Url> {
        match self.base_url() {
            Some(base_url) => Ok(base_url.join(path)?),
            None => Url::parse(path).map_err(Error::from),
        }
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn base_url(&self) -> Option<&Url> {
        (**self).base_url()
    }
}
