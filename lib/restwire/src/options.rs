//! REST client options.

use restwire_core::{APPLICATION_JSON, Encoding, JsonSettings};

/// Options a [`RestClient`](crate::RestClient) is bound to for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestClientOptions {
    /// Name of the transport to resolve; `None` selects the default one.
    pub transport_name: Option<String>,
    /// Encoding of request bodies.
    pub encoding: Encoding,
    /// Media type of request bodies.
    pub content_type: String,
    /// Serializer configuration, for request bodies and responses.
    pub json_settings: JsonSettings,
}

impl Default for RestClientOptions {
    fn default() -> Self {
        Self {
            transport_name: None,
            encoding: Encoding::Utf8,
            content_type: APPLICATION_JSON.to_string(),
            json_settings: JsonSettings::DEFAULT,
        }
    }
}

impl RestClientOptions {
    /// Create a new options builder.
    #[must_use]
    pub fn builder() -> RestClientOptionsBuilder {
        RestClientOptionsBuilder::default()
    }

    /// Options for the transport named `name`, other values defaulted.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            transport_name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Builder for [`RestClientOptions`].
#[derive(Debug, Clone, Default)]
pub struct RestClientOptionsBuilder {
    options: RestClientOptions,
}

impl RestClientOptionsBuilder {
    /// Set the transport name.
    #[must_use]
    pub fn transport_name(mut self, name: impl Into<String>) -> Self {
        self.options.transport_name = Some(name.into());
        self
    }

    /// Set the encoding of request bodies.
    #[must_use]
    pub const fn encoding(mut self, encoding: Encoding) -> Self {
        self.options.encoding = encoding;
        self
    }

    /// Set the media type of request bodies.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.options.content_type = content_type.into();
        self
    }

    /// Set the serializer configuration.
    #[must_use]
    pub const fn json_settings(mut self, settings: JsonSettings) -> Self {
        self.options.json_settings = settings;
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> RestClientOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use restwire_core::Formatting;

    use super::*;

    #[test]
    fn default_options() {
        let options = RestClientOptions::default();
        assert_eq!(options.transport_name, None);
        assert_eq!(options.encoding, Encoding::Utf8);
        assert_eq!(options.content_type, "application/json");
        assert_eq!(options.json_settings, JsonSettings::DEFAULT);
    }

    #[test]
    fn builder_overrides() {
        let settings = JsonSettings::DEFAULT.with_formatting(Formatting::Indented);
        let options = RestClientOptions::builder()
            .transport_name("RequestBin")
            .encoding(Encoding::Utf16Le)
            .content_type("application/vnd.api+json")
            .json_settings(settings)
            .build();

        assert_eq!(options.transport_name.as_deref(), Some("RequestBin"));
        assert_eq!(options.encoding, Encoding::Utf16Le);
        assert_eq!(options.content_type, "application/vnd.api+json");
        assert_eq!(options.json_settings, settings);
    }

    #[test]
    fn named_options() {
        let options = RestClientOptions::named("RequestBin");
        assert_eq!(options.transport_name.as_deref(), Some("RequestBin"));
        assert_eq!(options.encoding, Encoding::Utf8);
    }
}
