//! HTTP methods.

use derive_more::Display;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// `GET`
    #[display("GET")]
    Get,
    /// `POST`
    #[display("POST")]
    Post,
    /// `PUT`
    #[display("PUT")]
    Put,
    /// `DELETE`
    #[display("DELETE")]
    Delete,
    /// `PATCH`
    #[display("PATCH")]
    Patch,
    /// `HEAD`
    #[display("HEAD")]
    Head,
    /// `OPTIONS`
    #[display("OPTIONS")]
    Options,
    /// `TRACE`
    #[display("TRACE")]
    Trace,
}

impl Method {
    /// Identifier attached to request log events.
    ///
    /// Methods without a dedicated identifier share `1000`.
    #[must_use]
    pub const fn event_id(&self) -> u16 {
        match self {
            Self::Get => 1001,
            Self::Post => 1002,
            Self::Put => 1003,
            Self::Delete => 1004,
            Self::Options => 1005,
            Self::Head => 1006,
            Self::Trace => 1007,
            Self::Patch => 1000,
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
            Method::Trace => Self::TRACE,
        }
    }
}
