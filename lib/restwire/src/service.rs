//! Tower service stacks as HTTP clients.

use std::future::Future;

use tower::ServiceExt;
use tower_service::Service;
use url::Url;

use crate::{Error, HttpClient, Request, Response, Result, Transport};

/// An [`HttpClient`] dispatching through a tower [`Service`] stack.
///
/// Each call drives a clone of the stack, so layers with state must keep it
/// shared between clones.
///
/// ```ignore
/// use restwire::prelude::*;
/// use restwire::tower::ServiceBuilder;
/// use restwire::tower::util::MapRequestLayer;
///
/// let stack = ServiceBuilder::new()
///     .layer(MapRequestLayer::new(|mut request: Request| {
///         request
///             .headers_mut()
///             .insert("x-client", header::HeaderValue::from_static("restwire"));
///         request
///     }))
///     .service(HyperClient::new());
///
/// let people = Endpoint::new(ServiceClient::new(stack), "https://localtest.me:8080")?;
/// ```
#[derive(Debug, Clone)]
pub struct ServiceClient<S> {
    service: S,
}

impl<S> ServiceClient<S> {
    /// Wrap a service stack.
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    /// Consume and return the stack.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.service
    }
}

impl<S> HttpClient for ServiceClient<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + Sync,
    S::Future: Send,
{
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        self.service.clone().oneshot(request)
    }
}

impl<S> Transport for ServiceClient<S>
where
    S: Service<Request, Response = Response, Error = Error> + Clone + Send + Sync,
    S::Future: Send,
{
    fn base_url(&self) -> Option<&Url> {
        None
    }
}
