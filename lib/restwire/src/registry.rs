//! Named transports and REST clients.
//!
//! [`TransportRegistry`] maps names to transport bindings and is the
//! [`TransportFactory`] a [`RestClient`] resolves transports from.
//! [`RestClientRegistry`] pairs each name with the [`RestClientOptions`] of
//! the client using it.
//!
//! # Example
//!
//! ```ignore
//! use restwire::prelude::*;
//!
//! let http = HyperClient::new();
//! let fallback = Endpoint::new(http.clone(), "http://localhost:8080")?;
//! let request_bin = Endpoint::new(http, "https://localtest.me:8080")?;
//!
//! let mut registry = RestClientRegistry::new(move || fallback.clone());
//! registry.add_client("RequestBin", move || request_bin.clone(), |options| options);
//!
//! let client = registry.client("RequestBin").expect("registered");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::{RestClient, RestClientOptions, RestClientOptionsBuilder, Result, Transport, TransportFactory};

/// Name of the client registered without an explicit name.
pub const DEFAULT_CLIENT_NAME: &str = "Default";

type Binding<T> = Arc<dyn Fn() -> T + Send + Sync>;

// ============================================================================
// Transport Registry
// ============================================================================

/// Transport bindings by name, plus a default binding.
///
/// Each [`create`](TransportFactory::create) call invokes the binding; no
/// transport is cached. Unknown names fall back to the default binding.
pub struct TransportRegistry<T> {
    default: Binding<T>,
    named: HashMap<String, Binding<T>>,
}

impl<T> Clone for TransportRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            default: Arc::clone(&self.default),
            named: self.named.clone(),
        }
    }
}

impl<T> fmt::Debug for TransportRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.named.keys().collect();
        names.sort();
        f.debug_struct("TransportRegistry")
            .field("names", &names)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> TransportRegistry<T> {
    /// Create a registry with the binding used when no name matches.
    #[must_use]
    pub fn new(default: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            default: Arc::new(default),
            named: HashMap::new(),
        }
    }

    /// Register `binding` under `name`, replacing any previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        binding: impl Fn() -> T + Send + Sync + 'static,
    ) -> &mut Self {
        self.named.insert(name.into(), Arc::new(binding));
        self
    }

    /// Builder-style [`TransportRegistry::register`].
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        binding: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        self.register(name, binding);
        self
    }

    /// Returns `true` if a binding is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }
}

impl<T: Transport> TransportFactory for TransportRegistry<T> {
    type Transport = T;

    fn create(&self, name: Option<&str>) -> Result<T> {
        let binding = match name {
            None => &self.default,
            Some(name) => self.named.get(name).unwrap_or_else(|| {
                debug!(name, "no transport registered under this name, using the default one");
                &self.default
            }),
        };

        Ok((**binding)())
    }
}

// ============================================================================
// REST Client Registry
// ============================================================================

/// Named REST clients, each bound to its own transport and options.
pub struct RestClientRegistry<T> {
    transports: Arc<TransportRegistry<T>>,
    options: HashMap<String, RestClientOptions>,
}

impl<T> fmt::Debug for RestClientRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClientRegistry")
            .field("transports", &self.transports)
            .field("options", &self.options)
            .finish()
    }
}

impl<T: Transport> RestClientRegistry<T> {
    /// Create a registry with the transport used for unknown names.
    #[must_use]
    pub fn new(default: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            transports: Arc::new(TransportRegistry::new(default)),
            options: HashMap::new(),
        }
    }

    /// Register a client under `name`.
    ///
    /// `binding` creates the transport, `configure` adjusts the options
    /// (their [`transport_name`](RestClientOptions::transport_name) starts
    /// as `name`). Clients obtained earlier keep the registrations they were
    /// created with.
    pub fn add_client(
        &mut self,
        name: impl Into<String>,
        binding: impl Fn() -> T + Send + Sync + 'static,
        configure: impl FnOnce(RestClientOptionsBuilder) -> RestClientOptionsBuilder,
    ) -> &mut Self {
        let name = name.into();
        Arc::make_mut(&mut self.transports).register(name.clone(), binding);

        let options = configure(RestClientOptions::builder().transport_name(name.clone())).build();
        self.options.insert(name, options);
        self
    }

    /// Register a client under [`DEFAULT_CLIENT_NAME`].
    pub fn add_default_client(
        &mut self,
        binding: impl Fn() -> T + Send + Sync + 'static,
        configure: impl FnOnce(RestClientOptionsBuilder) -> RestClientOptionsBuilder,
    ) -> &mut Self {
        self.add_client(DEFAULT_CLIENT_NAME, binding, configure)
    }

    /// The client registered under `name`.
    #[must_use]
    pub fn client(&self, name: &str) -> Option<RestClient<TransportRegistry<T>>> {
        self.options
            .get(name)
            .map(|options| RestClient::with_factory(Arc::clone(&self.transports), options.clone()))
    }

    /// The client registered under [`DEFAULT_CLIENT_NAME`].
    #[must_use]
    pub fn default_client(&self) -> Option<RestClient<TransportRegistry<T>>> {
        self.client(DEFAULT_CLIENT_NAME)
    }

    /// The transports of registered clients.
    #[must_use]
    pub fn transports(&self) -> &TransportRegistry<T> {
        &self.transports
    }
}
