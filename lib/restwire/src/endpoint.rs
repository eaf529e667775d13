//! Base-URL binding for any HTTP client.

use std::future::Future;

use url::Url;

use crate::{HttpClient, Request, Response, Result, Transport};

/// Binds an [`HttpClient`] to a base URL, turning it into a [`Transport`].
///
/// Several endpoints can share one client (and its connection pool and
/// layers), one per upstream service.
///
/// # Example
///
/// ```ignore
/// use restwire::{Endpoint, HyperClient};
///
/// let http = HyperClient::new();
///
/// let people = Endpoint::new(http.clone(), "https://localtest.me:8080")?;
/// let orders = Endpoint::new(http, "https://orders.example.com/api/")?;
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint<C> {
    client: C,
    base_url: Url,
}

impl<C> Endpoint<C> {
    /// Bind `client` to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn new(client: C, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url.as_ref())?,
        })
    }

    /// Bind `client` to an already parsed URL.
    #[must_use]
    pub fn with_url(client: C, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The wrapped client.
    #[must_use]
    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Consume the endpoint and return the wrapped client.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.client
    }
}

impl<C: HttpClient> HttpClient for Endpoint<C> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.client.execute(request)
    }
}

impl<C: HttpClient> Transport for Endpoint<C> {
    fn base_url(&self) -> Option<&Url> {
        Some(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, HyperClient};

    #[test]
    fn endpoint_resolves_paths() {
        let endpoint = Endpoint::new(HyperClient::new(), "https://localtest.me:8080")
            .expect("valid URL");

        let url = endpoint.resolve("/v1/person?id=42").expect("resolve");
        assert_eq!(url.as_str(), "https://localtest.me:8080/v1/person?id=42");
    }

    #[test]
    fn endpoint_invalid_url() {
        let result = Endpoint::new(HyperClient::new(), "not a url");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn endpoint_with_url() {
        let url = Url::parse("https://api.example.com/v2/").expect("valid URL");
        let endpoint = Endpoint::with_url(HyperClient::new(), url.clone());

        assert_eq!(endpoint.base_url(), Some(&url));
        assert!(endpoint.inner().base_url().is_none());
    }
}
