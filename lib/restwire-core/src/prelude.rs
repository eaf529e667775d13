//! Prelude module for convenient imports.
//!
//! ```ignore
//! use restwire_core::prelude::*;
//! ```

pub use crate::{
    Encoding, Error, HttpClient, JsonContent, JsonSettings, Method, QueryString,
    QueryStringBuilder, Request, Response, RestClientError, Result, Transport,
    TransportFactory,
};
