//! Typed REST calls over a [`Transport`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{Instrument, Level, span};

use crate::logging;
use crate::{
    Error, HttpClient, JsonContent, Method, QueryString, Request, Response, RestClientError,
    RestClientOptions, Result, Transport, TransportFactory,
};

/// Sends JSON requests and decodes JSON responses.
///
/// A client is bound to one [`RestClientOptions`] snapshot and resolves its
/// transport from the factory on every call, by
/// [`transport_name`](RestClientOptions::transport_name) when set.
///
/// Any status outside `200..=299` fails with [`Error::Rest`]; transport
/// failures are returned unchanged.
///
/// # Example
///
/// ```ignore
/// use restwire::prelude::*;
///
/// let endpoint = Endpoint::new(HyperClient::new(), "https://localtest.me:8080")?;
/// let client = RestClient::new(
///     move |_: Option<&str>| Ok::<_, Error>(endpoint.clone()),
///     RestClientOptions::default(),
/// );
///
/// let mut query = QueryStringBuilder::new();
/// query.add("id", "42")?;
///
/// let person: Person = client.get("/v1/person", Some(&query.build())).await?;
/// ```
pub struct RestClient<F> {
    factory: Arc<F>,
    options: RestClientOptions,
}

impl<F> Clone for RestClient<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            options: self.options.clone(),
        }
    }
}

impl<F> fmt::Debug for RestClient<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<F: TransportFactory> RestClient<F> {
    /// Create a client owning its factory.
    #[must_use]
    pub fn new(factory: F, options: RestClientOptions) -> Self {
        Self::with_factory(Arc::new(factory), options)
    }

    /// Create a client sharing a factory.
    #[must_use]
    pub fn with_factory(factory: Arc<F>, options: RestClientOptions) -> Self {
        Self { factory, options }
    }

    /// Options this client is bound to.
    #[must_use]
    pub const fn options(&self) -> &RestClientOptions {
        &self.options
    }

    /// The transport factory.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Serialize a value with the bound encoding, media type and settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the value serializes to `null`,
    /// or [`Error::JsonSerialization`] if serialization fails.
    pub fn content<C: Serialize + ?Sized>(&self, value: &C) -> Result<JsonContent> {
        JsonContent::from_object(
            value,
            self.options.encoding,
            self.options.content_type.as_str(),
            &self.options.json_settings,
        )
    }

    /// Dispatch a request and return the successful response.
    ///
    /// `path` is resolved against the transport base URL; `query` is appended
    /// when it has items.
    ///
    /// # Errors
    ///
    /// - [`Error::Rest`] if the status is outside `200..=299`
    /// - transport errors ([`Error::Connection`], [`Error::Tls`], [`Error::Timeout`]) as-is
    /// - [`Error::InvalidUrl`] if the path cannot be resolved
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        content: Option<JsonContent>,
        query: Option<&QueryString>,
    ) -> Result<Response> {
        let uri = compose_path(path, query);
        let span = span!(Level::INFO, "http_request", %method, %uri);

        self.dispatch(method, uri, content).instrument(span).await
    }

    async fn dispatch(
        &self,
        method: Method,
        uri: String,
        content: Option<JsonContent>,
    ) -> Result<Response> {
        logging::log_request(method, &uri, content.as_ref());

        let transport = self
            .factory
            .create(self.options.transport_name.as_deref())?;
        let url = transport.resolve(&uri)?;

        let mut request = Request::new(method, url);
        if let Some(content) = content {
            request = request.with_content(content);
        }
        let path_and_query = request.path_and_query().to_string();

        let response = match transport.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                logging::log_transport_error(method, &path_and_query, &err);
                return Err(err);
            }
        };

        if response.is_success() {
            logging::log_success(method, &path_and_query, &response);
            return Ok(response);
        }

        let payload = JsonContent::from_response(&response).as_text();
        logging::log_failure(method, &path_and_query, &response, payload.as_deref());

        let mut error = RestClientError::new(
            response.status().as_u16(),
            response.reason_phrase().map(str::to_string),
        );
        if let Some(payload) = payload.ok().filter(|payload| !payload.is_empty()) {
            error = error.with_payload(payload);
        }
        Err(Error::Rest(error))
    }

    fn read<R: DeserializeOwned>(&self, response: &Response) -> Result<R> {
        JsonContent::from_response(response).read_as(&self.options.json_settings)
    }

    /// Send a request without body, ignoring the response payload.
    ///
    /// # Errors
    ///
    /// See [`RestClient::execute`].
    pub async fn send(&self, method: Method, path: &str, query: Option<&QueryString>) -> Result<()> {
        self.execute(method, path, None, query).await.map(drop)
    }

    /// Send a JSON body, ignoring the response payload.
    ///
    /// # Errors
    ///
    /// Serialization errors (before any I/O), then see [`RestClient::execute`].
    pub async fn send_json<C: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        content: &C,
        query: Option<&QueryString>,
    ) -> Result<()> {
        let content = self.content(content)?;
        self.execute(method, path, Some(content), query)
            .await
            .map(drop)
    }

    /// Send a request without body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`RestClient::execute`]; a 2xx payload that does not decode into
    /// `R` fails with [`Error::JsonDeserialization`] or [`Error::InvalidEncoding`].
    pub async fn receive<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryString>,
    ) -> Result<R> {
        let response = self.execute(method, path, None, query).await?;
        self.read(&response)
    }

    /// Send a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`RestClient::send_json`] and [`RestClient::receive`].
    pub async fn exchange<C: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        content: &C,
        query: Option<&QueryString>,
    ) -> Result<R> {
        let content = self.content(content)?;
        let response = self.execute(method, path, Some(content), query).await?;
        self.read(&response)
    }

    // ========================================================================
    // Verb helpers
    // ========================================================================

    /// `GET` decoding the response.
    ///
    /// # Errors
    ///
    /// See [`RestClient::receive`].
    pub async fn get<R: DeserializeOwned>(&self, path: &str, query: Option<&QueryString>) -> Result<R> {
        self.receive(Method::Get, path, query).await
    }

    /// `POST` without body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::send`].
    pub async fn post(&self, path: &str, query: Option<&QueryString>) -> Result<()> {
        self.send(Method::Post, path, query).await
    }

    /// `POST` a JSON body, decoding the response.
    ///
    /// Use [`serde::de::IgnoredAny`] as `R` to skip the response payload.
    ///
    /// # Errors
    ///
    /// See [`RestClient::exchange`].
    pub async fn post_json<C: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        content: &C,
        query: Option<&QueryString>,
    ) -> Result<R> {
        self.exchange(Method::Post, path, content, query).await
    }

    /// `PUT` without body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::send`].
    pub async fn put(&self, path: &str, query: Option<&QueryString>) -> Result<()> {
        self.send(Method::Put, path, query).await
    }

    /// `PUT` a JSON body, decoding the response.
    ///
    /// # Errors
    ///
    /// See [`RestClient::exchange`].
    pub async fn put_json<C: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        content: &C,
        query: Option<&QueryString>,
    ) -> Result<R> {
        self.exchange(Method::Put, path, content, query).await
    }

    /// `DELETE` without body.
    ///
    /// # Errors
    ///
    /// See [`RestClient::send`].
    pub async fn delete(&self, path: &str, query: Option<&QueryString>) -> Result<()> {
        self.send(Method::Delete, path, query).await
    }

    /// `DELETE` with a JSON body, decoding the response.
    ///
    /// # Errors
    ///
    /// See [`RestClient::exchange`].
    pub async fn delete_json<C: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        content: &C,
        query: Option<&QueryString>,
    ) -> Result<R> {
        self.exchange(Method::Delete, path, content, query).await
    }
}

/// `path`, plus `?` and the serialized query when it has items.
fn compose_path(path: &str, query: Option<&QueryString>) -> String {
    match query {
        Some(query) if query.has_items() => format!("{path}?{}", query.query()),
        _ => path.to_string(),
    }
}
