//! Error types for restwire.

use std::fmt;

use derive_more::{Display, Error, From};

// ============================================================================
// REST Client Error
// ============================================================================

/// A response came back with a status outside the `200..=299` range.
///
/// Carries the status code, the reason phrase (when known) and the response
/// payload read as text (best-effort: `None` when the body was empty or could
/// not be decoded).
///
/// # Example
///
/// ```
/// use restwire_core::RestClientError;
///
/// let error = RestClientError::new(404, Some("Not Found".to_string()))
///     .with_payload("not found");
///
/// assert_eq!(error.status_code, 404);
/// assert_eq!(error.payload.as_deref(), Some("not found"));
/// assert_eq!(error.to_string(), "HTTP error 404 (Not Found)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct RestClientError {
    /// HTTP status code.
    pub status_code: u16,
    /// Reason phrase returned with the status, if any.
    pub reason_phrase: Option<String>,
    /// Raw response payload, if it could be read as text.
    pub payload: Option<String>,
}

impl RestClientError {
    /// Create an error for the given status and reason phrase.
    #[must_use]
    pub const fn new(status_code: u16, reason_phrase: Option<String>) -> Self {
        Self {
            status_code,
            reason_phrase,
            payload: None,
        }
    }

    /// Attach the response payload.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Returns `true` for a 4xx status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code >= 400 && self.status_code < 500
    }

    /// Returns `true` for a 5xx status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code >= 500 && self.status_code < 600
    }
}

impl fmt::Display for RestClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason_phrase {
            Some(reason) => write!(f, "HTTP error {} ({reason})", self.status_code),
            None => write!(f, "HTTP error {}", self.status_code),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for restwire operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A required argument was empty or null; raised before any I/O.
    #[display("invalid argument: {_0}")]
    #[from(skip)]
    InvalidArgument(#[error(not(source))] String),

    /// The server answered with a non-2xx status.
    #[display("{_0}")]
    #[from]
    Rest(RestClientError),

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// The request could not be built.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "user.address.city").
        path: String,
        /// Error message.
        message: String,
    },

    /// A payload could not be decoded with its character encoding.
    #[display("invalid {charset} payload: {message}")]
    #[from(skip)]
    InvalidEncoding {
        /// Charset label of the encoding used.
        charset: &'static str,
        /// Error message.
        message: String,
    },

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an encoding error.
    #[must_use]
    pub fn invalid_encoding(charset: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            charset,
            message: message.into(),
        }
    }

    /// The REST error, if the server answered with a non-2xx status.
    #[must_use]
    pub const fn as_rest(&self) -> Option<&RestClientError> {
        match self {
            Self::Rest(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if the transport failed before a response was received.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Tls(_) | Self::Timeout)
    }

    /// Returns `true` if a payload could not be decoded into the requested type.
    #[must_use]
    pub const fn is_deserialization(&self) -> bool {
        matches!(
            self,
            Self::JsonDeserialization { .. } | Self::InvalidEncoding { .. }
        )
    }

    /// Returns the HTTP status code if this is a REST error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rest(error) => Some(error.status_code),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.as_rest().is_some_and(RestClientError::is_client_error)
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.as_rest().is_some_and(RestClientError::is_server_error)
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response payload if this is a REST error with a payload.
    #[must_use]
    pub fn payload(&self) -> Option<&str> {
        self.as_rest().and_then(|error| error.payload.as_deref())
    }

    /// Try to decode the REST error payload as JSON.
    ///
    /// Returns `Some(Ok(value))` if the error has a payload and it deserializes successfully,
    /// `Some(Err(error))` if the payload exists but deserialization fails,
    /// or `None` if there is no payload or this is not a REST error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// #[derive(Debug, Deserialize)]
    /// struct ApiError {
    ///     code: String,
    ///     message: String,
    /// }
    ///
    /// match client.receive::<User>(Method::Get, "/users/1", None).await {
    ///     Ok(user) => println!("User: {:?}", user),
    ///     Err(e) => {
    ///         if let Some(Ok(api_error)) = e.decode_payload::<ApiError>() {
    ///             println!("API error: {} - {}", api_error.code, api_error.message);
    ///         }
    ///     }
    /// }
    /// ```
    pub fn decode_payload<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.payload()
            .map(|payload| crate::from_json(payload, &crate::JsonSettings::DEFAULT))
    }
}
