//! Default transport: a pooled hyper-util client over rustls.

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::ext::ReasonPhrase;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::{self, Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tower_service::Service;
use url::Url;

use crate::{ClientConfig, Error, HttpClient, Request, Response, Result, Transport};

type Pool = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

/// Sends [`Request`]s over HTTP/1.1 or HTTP/2, with TLS for `https` URLs.
///
/// Clones share the connection pool. The client has no base URL: bind it to
/// one with an [`Endpoint`](crate::Endpoint), or send absolute URLs.
///
/// Responses keep the reason phrase of the status line (HTTP/1 only), so a
/// failed REST call reports what the server said.
///
/// ```ignore
/// use std::time::Duration;
/// use restwire::{ClientConfig, Endpoint, HyperClient};
///
/// let http = HyperClient::with_config(
///     ClientConfig::builder().timeout(Duration::from_secs(5)).build(),
/// );
/// let people = Endpoint::new(http, "https://localtest.me:8080")?;
/// ```
#[derive(Clone)]
pub struct HyperClient {
    pool: Pool,
    config: ClientConfig,
}

impl fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HyperClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HyperClient {
    /// A client with the default [`ClientConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// A client with its own timeouts and pool sizing.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let pool = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector(&config));

        Self { pool, config }
    }

    /// Settings the client was built with.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn exchange(&self, request: Request) -> Result<Response> {
        let request = request.into_http()?.map(Full::new);

        tokio::time::timeout(self.config.timeout, self.round_trip(request))
            .await
            .map_err(|_| Error::Timeout)?
    }

    async fn round_trip(&self, request: http::Request<Full<Bytes>>) -> Result<Response> {
        let response = self
            .pool
            .request(request)
            .await
            .map_err(|err| transport_error(&err))?;

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|err| Error::connection(format!("reading response body: {err}")))?
            .to_bytes();

        let mut response = Response::new(parts.status, body);
        *response.headers_mut() = parts.headers;
        if let Some(reason) = parts.extensions.get::<ReasonPhrase>() {
            response = response.with_reason_phrase(String::from_utf8_lossy(reason.as_bytes()));
        }

        Ok(response)
    }
}

impl HttpClient for HyperClient {
    async fn execute(&self, request: Request) -> Result<Response> {
        self.exchange(request).await
    }
}

impl Transport for HyperClient {
    fn base_url(&self) -> Option<&Url> {
        None
    }
}

impl Service<Request> for HyperClient {
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let client = self.clone();
        Box::pin(async move { client.exchange(request).await })
    }
}

/// rustls with the Mozilla roots; plain `http` URLs are let through.
fn connector(config: &ClientConfig) -> HttpsConnector<HttpConnector> {
    let roots: rustls::RootCertStore = webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();
    let tls = rustls::ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut tcp = HttpConnector::new();
    tcp.enforce_http(false);
    tcp.set_connect_timeout(Some(config.connect_timeout));

    HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_all_versions()
        .wrap_connector(tcp)
}

/// [`Error::Tls`] when rustls is anywhere in the chain, [`Error::Connection`]
/// otherwise. The message joins the whole chain.
fn transport_error(err: &legacy::Error) -> Error {
    let chain: Vec<&(dyn StdError + 'static)> =
        std::iter::successors(Some(err as &(dyn StdError + 'static)), |err: &&(dyn StdError + 'static)| (*err).source())
            .collect();
    let message = chain
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ");

    if chain.iter().any(|err| is_tls(*err)) {
        Error::tls(message)
    } else {
        Error::connection(message)
    }
}

fn is_tls(err: &(dyn StdError + 'static)) -> bool {
    err.is::<rustls::Error>()
        || err
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::get_ref)
            .is_some_and(|inner| inner.is::<rustls::Error>())
}
