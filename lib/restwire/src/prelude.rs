//! Prelude module for convenient imports.
//!
//! ```ignore
//! use restwire::prelude::*;
//! ```

pub use crate::{
    ClientConfig, Encoding, Endpoint, Error, HttpClient, HyperClient, JsonContent, JsonSettings,
    Method, QueryString, QueryStringBuilder, Request, Response, RestClient, RestClientError,
    RestClientOptions, RestClientRegistry, Result, ServiceClient, StatusCode, Transport,
    TransportFactory, TransportRegistry, header,
};
pub use serde::{Deserialize, Serialize};
