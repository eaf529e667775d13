//! Buffered HTTP responses.
//!
//! A [`Response`] keeps the reason phrase the server sent, so failed calls
//! can report it as-is. Transports without one (HTTP/2, test doubles) fall
//! back to the canonical phrase of the status.

use bytes::Bytes;
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::{JsonContent, JsonSettings, Result};

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    reason_phrase: Option<String>,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// A response without headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            reason_phrase: None,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Set a header, replacing previous values.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Record the reason phrase of the status line. Empty phrases are ignored.
    #[must_use]
    pub fn with_reason_phrase(mut self, reason_phrase: impl Into<String>) -> Self {
        let reason_phrase = reason_phrase.into();
        if !reason_phrase.is_empty() {
            self.reason_phrase = Some(reason_phrase);
        }
        self
    }

    /// Status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason phrase sent by the server, or the canonical one for the status.
    #[must_use]
    pub fn reason_phrase(&self) -> Option<&str> {
        self.reason_phrase
            .as_deref()
            .or_else(|| self.status.canonical_reason())
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable access to the headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// First value of a header, when it is visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Media type of the `Content-Type` header, without parameters.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        let (media_type, _) = self.content_type()?;
        Some(media_type).filter(|media_type| !media_type.is_empty())
    }

    /// `charset` parameter of the `Content-Type` header.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        let (_, params) = self.content_type()?;
        params
            .split(';')
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, value)| value.trim())
    }

    fn content_type(&self) -> Option<(&str, &str)> {
        let value = self.headers.get(CONTENT_TYPE)?.to_str().ok()?;
        let (media_type, params) = value.split_once(';').unwrap_or((value, ""));
        Some((media_type.trim(), params))
    }

    /// Buffered body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Status is in `200..=299`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status is 4xx.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    /// Status is 5xx.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// Decode the body as JSON with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding or deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        JsonContent::from_response(self).read_as(&JsonSettings::DEFAULT)
    }

    /// Body text, in the `charset` of the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid in its encoding.
    pub fn text(&self) -> Result<String> {
        JsonContent::from_response(self).as_text()
    }
}
