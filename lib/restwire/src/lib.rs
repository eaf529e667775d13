//! Typed REST client over a pluggable HTTP transport.
//!
//! Send JSON bodies, decode JSON responses, compose query strings, and get a
//! single [`Error`] for transport failures and non-2xx statuses alike.
//!
//! # Example
//!
//! ```ignore
//! use restwire::prelude::*;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! pub struct Person {
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! let http = HyperClient::new();
//! let fallback = Endpoint::new(http.clone(), "http://localhost:8080")?;
//! let request_bin = Endpoint::new(http, "https://localtest.me:8080")?;
//!
//! let mut registry = RestClientRegistry::new(move || fallback.clone());
//! registry.add_client("RequestBin", move || request_bin.clone(), |options| options);
//!
//! let client = registry.client("RequestBin").expect("registered");
//! client.send_json(Method::Post, "/v1/person", &person, None).await?;
//! ```
//!
//! The transport is any [`Transport`]; [`HyperClient`] is the default one,
//! and [`ServiceClient`] runs it under tower layers.

mod client;
mod config;
mod endpoint;
mod logging;
mod options;
pub mod prelude;
mod registry;
mod rest_client;
mod service;

pub use client::HyperClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use endpoint::Endpoint;
pub use options::{RestClientOptions, RestClientOptionsBuilder};
pub use registry::{DEFAULT_CLIENT_NAME, RestClientRegistry, TransportRegistry};
pub use rest_client::RestClient;
pub use service::ServiceClient;

// Re-export tower for service stacks
pub use tower;

// Re-export core types
pub use restwire_core::{
    APPLICATION_JSON, Encoding, Error, Formatting, Fragment, HttpClient, JsonContent,
    JsonSettings, Method, NullValueHandling, QueryString, QueryStringBuilder, QueryValue, Request,
    Response, RestClientError, Result, Transport, TransportFactory, from_json, to_json,
};

// Re-export http types for status codes and headers
pub use restwire_core::{StatusCode, header};

pub use url;
