//! Core types and traits for the restwire typed REST client.
//!
//! This crate provides the transport-agnostic building blocks:
//! - [`Method`] - HTTP method enum
//! - [`Request`] - a request ready for a transport
//! - [`Response`] - a buffered response, with the server's reason phrase
//! - [`Error`], [`RestClientError`] and [`Result`] - Error handling
//! - [`QueryStringBuilder`] and [`QueryString`] - Query string composition
//! - [`JsonContent`] - JSON payloads with media type and [`Encoding`]
//! - [`JsonSettings`] - Serializer configuration
//! - [`HttpClient`] and [`Transport`] - Request execution
//! - [`TransportFactory`] - Transport resolution by name
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)
//! - [`header`] - HTTP header names (re-exported from `http` crate)

mod client;
mod content;
mod encoding;
mod error;
mod factory;
mod json;
mod method;
pub mod prelude;
mod query;
mod request;
mod response;

pub use client::{HttpClient, Transport};
pub use content::{APPLICATION_JSON, JsonContent};
pub use encoding::Encoding;
pub use error::{Error, RestClientError, Result};
pub use factory::TransportFactory;
pub use json::{Formatting, JsonSettings, NullValueHandling, from_json, to_json};
pub use method::Method;
pub use query::{Fragment, QueryString, QueryStringBuilder, QueryValue};
pub use request::Request;
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
