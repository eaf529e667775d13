//! Requests as a REST client dispatches them.
//!
//! A [`Request`] holds an absolute URL and, optionally, the [`JsonContent`]
//! to send. The `Content-Type` header is derived from the content when the
//! request is turned into an [`http::Request`] by a transport.
//!
//! ```
//! use restwire_core::{JsonContent, Method, Request};
//!
//! let url = "https://localtest.me:8080/v1/person?id=42".parse().expect("valid URL");
//! let request = Request::new(Method::Post, url).with_content(JsonContent::empty_object());
//!
//! assert_eq!(request.path_and_query(), "/v1/person?id=42");
//!
//! let http = request.into_http().expect("valid request");
//! assert_eq!(http.headers()["content-type"], "application/json; charset=utf-8");
//! assert_eq!(&http.body()[..], b"{}");
//! ```

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use url::{Position, Url};

use crate::{Error, JsonContent, Method, Result};

/// A request ready for a transport.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    content: Option<JsonContent>,
}

impl Request {
    /// A request without headers or body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            content: None,
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_content(mut self, content: JsonContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Set a header, replacing previous values.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Absolute URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Path and query of the URL, e.g. `/v1/person?id=42`.
    #[must_use]
    pub fn path_and_query(&self) -> &str {
        &self.url[Position::BeforePath..Position::AfterQuery]
    }

    /// Headers set so far; `Content-Type` is not among them.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the headers, for tower layers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// JSON body, if any.
    #[must_use]
    pub const fn content(&self) -> Option<&JsonContent> {
        self.content.as_ref()
    }

    /// Convert into an [`http::Request`] with the encoded body and its
    /// `Content-Type`. Requests without content get an empty body; the URL
    /// fragment is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the media type is not a valid
    /// header value or the URL is rejected by `http`.
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let Self {
            method,
            url,
            mut headers,
            content,
        } = self;

        let body = match content {
            Some(content) => {
                let content_type = HeaderValue::try_from(content.content_type())
                    .map_err(|err| Error::invalid_request(format!("content type: {err}")))?;
                headers.insert(CONTENT_TYPE, content_type);
                content.into_bytes()
            }
            None => Bytes::new(),
        };

        let mut request = http::Request::builder()
            .method(http::Method::from(method))
            .uri(&url[..Position::AfterQuery])
            .body(body)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        *request.headers_mut() = headers;

        Ok(request)
    }
}
