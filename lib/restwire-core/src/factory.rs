//! Transport resolution by name.

use crate::{Result, Transport};

/// Creates the [`Transport`] a REST call dispatches through.
///
/// `name` is `None` for the default transport. Implementations are called
/// once per request and must not depend on earlier calls.
///
/// Any `Fn(Option<&str>) -> Result<T>` closure is a factory:
///
/// ```ignore
/// let factory = move |_name: Option<&str>| Ok(endpoint.clone());
/// ```
pub trait TransportFactory: Send + Sync {
    /// Transport produced by this factory.
    type Transport: Transport;

    /// Create the transport registered under `name`, or the default one.
    ///
    /// # Errors
    ///
    /// Returns an error if no transport can be created for the name.
    fn create(&self, name: Option<&str>) -> Result<Self::Transport>;
}

impl<F, T> TransportFactory for F
where
    F: Fn(Option<&str>) -> Result<T> + Send + Sync,
    T: Transport,
{
    type Transport = T;

    fn create(&self, name: Option<&str>) -> Result<T> {
        self(name)
    }
}
