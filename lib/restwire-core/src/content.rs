//! JSON request/response payloads.
//!
//! [`JsonContent`] pairs JSON bytes with the media type and character
//! encoding needed for the `Content-Type` header.
//!
//! # Example
//!
//! ```
//! use restwire_core::{Encoding, JsonContent, JsonSettings};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Person { first_name: String }
//!
//! let person = Person { first_name: "John".to_string() };
//! let content = JsonContent::from_object_default(&person).expect("serialize");
//! assert_eq!(content.content_type(), "application/json; charset=utf-8");
//!
//! let back: Person = content.read_as(&JsonSettings::DEFAULT).expect("deserialize");
//! assert_eq!(back, person);
//! ```

use bytes::Bytes;

use crate::{Encoding, Error, JsonSettings, Response, Result};

/// The `application/json` media type.
pub const APPLICATION_JSON: &str = "application/json";

/// A JSON payload with its media type and character encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonContent {
    bytes: Bytes,
    encoding: Encoding,
    media_type: String,
}

impl JsonContent {
    /// Wrap JSON text, encoding it with `encoding`.
    #[must_use]
    pub fn new(text: &str, encoding: Encoding, media_type: impl Into<String>) -> Self {
        Self {
            bytes: encoding.encode(text),
            encoding,
            media_type: media_type.into(),
        }
    }

    /// Wrap already-encoded bytes.
    #[must_use]
    pub fn from_bytes(bytes: Bytes, encoding: Encoding, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            encoding,
            media_type: media_type.into(),
        }
    }

    /// Serialize a value into a payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the value serializes to JSON `null`
    /// (e.g. `None`), or [`Error::JsonSerialization`] if serialization fails.
    pub fn from_object<T: serde::Serialize + ?Sized>(
        value: &T,
        encoding: Encoding,
        media_type: impl Into<String>,
        settings: &JsonSettings,
    ) -> Result<Self> {
        let text = crate::to_json(value, settings)?;
        if text == "null" {
            return Err(Error::invalid_argument("content must not be null"));
        }

        Ok(Self::new(&text, encoding, media_type))
    }

    /// Serialize a value as UTF-8 `application/json` with default settings.
    ///
    /// # Errors
    ///
    /// See [`JsonContent::from_object`].
    pub fn from_object_default<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Self::from_object(value, Encoding::Utf8, APPLICATION_JSON, &JsonSettings::DEFAULT)
    }

    /// Wrap a response body.
    ///
    /// The encoding comes from the `charset` of the response `Content-Type`,
    /// falling back to UTF-8 when it is missing or unknown.
    #[must_use]
    pub fn from_response(response: &Response) -> Self {
        let encoding = response
            .charset()
            .and_then(Encoding::from_charset)
            .unwrap_or_default();
        let media_type = response.media_type().unwrap_or(APPLICATION_JSON);

        Self::from_bytes(response.body().clone(), encoding, media_type)
    }

    /// Placeholder payload `{}`.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::from_bytes(Bytes::from_static(b"{}"), Encoding::Utf8, APPLICATION_JSON)
    }

    /// Placeholder payload `[]`.
    #[must_use]
    pub fn empty_array() -> Self {
        Self::from_bytes(Bytes::from_static(b"[]"), Encoding::Utf8, APPLICATION_JSON)
    }

    /// Media type, without parameters.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Character encoding of the bytes.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Value for the `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{}; charset={}", self.media_type, self.encoding.charset())
    }

    /// Encoded bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Number of encoded bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if there are no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the bytes into text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the bytes are not valid for the encoding.
    pub fn as_text(&self) -> Result<String> {
        self.encoding.decode(&self.bytes)
    }

    /// Deserialize the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] or [`Error::JsonDeserialization`].
    pub fn read_as<T: serde::de::DeserializeOwned>(&self, settings: &JsonSettings) -> Result<T> {
        let text = self.as_text()?;
        crate::from_json(&text, settings)
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use http::StatusCode;
    use http::header::{CONTENT_TYPE, HeaderValue};

    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Person {
        first_name: String,
        last_name: Option<String>,
    }

    fn john() -> Person {
        Person {
            first_name: "John".to_string(),
            last_name: Some("Doe".to_string()),
        }
    }

    #[test]
    fn from_object_defaults() {
        let content = JsonContent::from_object_default(&john()).expect("serialize");

        check!(content.media_type() == "application/json");
        check!(content.encoding() == Encoding::Utf8);
        check!(content.content_type() == "application/json; charset=utf-8");
        check!(content.as_bytes().as_ref() == br#"{"first_name":"John","last_name":"Doe"}"#);
    }

    #[test]
    fn from_object_custom_encoding_and_media_type() {
        let content = JsonContent::from_object(
            &john(),
            Encoding::Utf16Le,
            "application/vnd.api+json",
            &JsonSettings::DEFAULT,
        )
        .expect("serialize");

        check!(content.content_type() == "application/vnd.api+json; charset=utf-16le");
        check!(content.len() % 2 == 0);
        let back: Person = content.read_as(&JsonSettings::DEFAULT).expect("round trip");
        check!(back == john());
    }

    #[test]
    fn from_object_rejects_null() {
        let nothing: Option<Person> = None;
        let result = JsonContent::from_object_default(&nothing);

        let_assert!(Err(Error::InvalidArgument(message)) = result);
        check!(message.contains("null"));
    }

    #[test]
    fn empty_placeholders() {
        check!(JsonContent::empty_object().as_text().expect("text") == "{}");
        check!(JsonContent::empty_array().as_text().expect("text") == "[]");

        let items: Vec<Person> = JsonContent::empty_array()
            .read_as(&JsonSettings::DEFAULT)
            .expect("empty array");
        check!(items.is_empty());
    }

    #[test]
    fn read_as_shape_mismatch() {
        let content = JsonContent::new(r#"{"first_name":1}"#, Encoding::Utf8, APPLICATION_JSON);
        let result: Result<Person> = content.read_as(&JsonSettings::DEFAULT);

        let_assert!(Err(Error::JsonDeserialization { path, .. }) = result);
        check!(path == "first_name");
    }

    #[test]
    fn from_response_uses_charset() {
        let body = Encoding::Utf16Be.encode(r#"{"first_name":"Åsa","last_name":null}"#);
        let response = Response::new(StatusCode::OK, body).with_header(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-16be"),
        );

        let content = JsonContent::from_response(&response);
        check!(content.encoding() == Encoding::Utf16Be);

        let person: Person = content.read_as(&JsonSettings::DEFAULT).expect("decode");
        check!(person.first_name == "Åsa");
        check!(person.last_name.is_none());
    }

    #[test]
    fn from_response_without_content_type() {
        let response = Response::new(StatusCode::OK, "[1,2]");

        let content = JsonContent::from_response(&response);
        check!(content.encoding() == Encoding::Utf8);
        check!(content.media_type() == APPLICATION_JSON);
    }
}
