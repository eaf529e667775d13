//! JSON serialization settings and helpers.

use serde_json::Value;

use crate::Result;

/// How serialized JSON is laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Formatting {
    /// Single line, no insignificant whitespace.
    #[default]
    Compact,
    /// Multi-line, two-space indentation.
    Indented,
}

/// What happens to object members whose value is `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NullValueHandling {
    /// Keep `null` members.
    #[default]
    Include,
    /// Drop `null` members from objects (at any depth). Array items are kept.
    Ignore,
}

/// Serializer configuration.
///
/// There is no mutable global default: pass settings explicitly, or use
/// [`JsonSettings::DEFAULT`].
///
/// # Example
///
/// ```
/// use restwire_core::{JsonSettings, NullValueHandling, to_json};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String, nickname: Option<String> }
///
/// let settings = JsonSettings::DEFAULT.with_null_values(NullValueHandling::Ignore);
/// let user = User { name: "Alice".to_string(), nickname: None };
/// assert_eq!(to_json(&user, &settings).expect("serialize"), r#"{"name":"Alice"}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JsonSettings {
    /// Output layout.
    pub formatting: Formatting,
    /// Handling of `null` object members on serialization.
    pub null_values: NullValueHandling,
    /// Decode an empty (or whitespace-only) payload as JSON `null`.
    pub empty_body_as_null: bool,
}

impl JsonSettings {
    /// Compact output, `null` members kept, empty payloads read as `null`.
    pub const DEFAULT: Self = Self {
        formatting: Formatting::Compact,
        null_values: NullValueHandling::Include,
        empty_body_as_null: true,
    };

    /// Set the output layout.
    #[must_use]
    pub const fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    /// Set the handling of `null` members.
    #[must_use]
    pub const fn with_null_values(mut self, null_values: NullValueHandling) -> Self {
        self.null_values = null_values;
        self
    }

    /// Set whether an empty payload decodes as `null`.
    #[must_use]
    pub const fn with_empty_body_as_null(mut self, empty_body_as_null: bool) -> Self {
        self.empty_body_as_null = empty_body_as_null;
        self
    }
}

impl Default for JsonSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Serialize a value to JSON text.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T, settings: &JsonSettings) -> Result<String> {
    let text = match settings.null_values {
        NullValueHandling::Include => write_json(value, settings.formatting)?,
        NullValueHandling::Ignore => {
            let mut tree = serde_json::to_value(value)?;
            strip_nulls(&mut tree);
            write_json(&tree, settings.formatting)?
        }
    };
    Ok(text)
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, formatting: Formatting) -> Result<String> {
    let text = match formatting {
        Formatting::Compact => serde_json::to_string(value)?,
        Formatting::Indented => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(members) => {
            members.retain(|_, member| !member.is_null());
            members.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// Deserialize JSON text to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` to provide detailed error messages that include
/// the exact path to the field that failed to deserialize.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "user.address.city").
///
/// # Example
///
/// ```
/// use restwire_core::{JsonSettings, from_json};
/// use serde::Deserialize;
///
/// #[derive(Debug, PartialEq, Deserialize)]
/// struct User { name: String }
///
/// let user: User = from_json(r#"{"name":"Alice"}"#, &JsonSettings::DEFAULT).expect("deserialize");
/// assert_eq!(user, User { name: "Alice".to_string() });
///
/// let nothing: Option<User> = from_json("", &JsonSettings::DEFAULT).expect("empty body");
/// assert_eq!(nothing, None);
/// ```
pub fn from_json<T: serde::de::DeserializeOwned>(text: &str, settings: &JsonSettings) -> Result<T> {
    let text = if settings.empty_body_as_null && text.trim().is_empty() {
        "null"
    } else {
        text
    };

    let mut deserializer = serde_json::Deserializer::from_str(text);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })?;
    deserializer
        .end()
        .map_err(|e| crate::Error::json_deserialization(".", e.to_string()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct User {
        name: String,
        age: u32,
        nickname: Option<String>,
    }

    fn alice() -> User {
        User {
            name: "Alice".to_string(),
            age: 30,
            nickname: None,
        }
    }

    #[test]
    fn to_json_compact() {
        let text = to_json(&alice(), &JsonSettings::DEFAULT).expect("serialize");
        assert_eq!(text, r#"{"name":"Alice","age":30,"nickname":null}"#);
    }

    #[test]
    fn to_json_indented() {
        let settings = JsonSettings::DEFAULT.with_formatting(Formatting::Indented);
        let text = to_json(&serde_json::json!({"id": 1}), &settings).expect("serialize");
        insta::assert_snapshot!(text, @r#"
        {
          "id": 1
        }
        "#);
    }

    #[test]
    fn to_json_ignores_nested_nulls() {
        let settings = JsonSettings::DEFAULT.with_null_values(NullValueHandling::Ignore);
        let value = serde_json::json!({
            "b": null,
            "a": {"x": null, "y": 1},
            "items": [null, {"z": null}]
        });

        let text = to_json(&value, &settings).expect("serialize");
        assert_eq!(text, r#"{"a":{"y":1},"items":[null,{}]}"#);
    }

    #[test]
    fn to_json_ignore_keeps_field_order() {
        let settings = JsonSettings::DEFAULT.with_null_values(NullValueHandling::Ignore);
        let text = to_json(&alice(), &settings).expect("serialize");
        assert_eq!(text, r#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn from_json_deserialize() {
        let user: User = from_json(
            r#"{"name":"Alice","age":30,"nickname":null}"#,
            &JsonSettings::DEFAULT,
        )
        .expect("deserialize");
        assert_eq!(user, alice());
    }

    #[test]
    fn from_json_empty_body() {
        from_json::<()>("  ", &JsonSettings::DEFAULT).expect("empty as null");

        let strict = JsonSettings::DEFAULT.with_empty_body_as_null(false);
        let result: Result<Option<User>> = from_json("", &strict);
        assert!(result.is_err());
    }

    #[test]
    fn from_json_syntax_error() {
        let result: Result<User> = from_json("not json", &JsonSettings::DEFAULT);

        let err = result.expect_err("should fail");
        assert!(err.is_deserialization());
        assert!(err.to_string().contains("JSON deserialization error"));
    }

    #[test]
    fn from_json_trailing_characters() {
        let result: Result<u32> = from_json("1 2", &JsonSettings::DEFAULT);
        assert!(result.is_err());
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Person {
            #[allow(dead_code)]
            address: Address,
        }

        // Missing 'city' field inside 'address'
        let result: Result<Person> = from_json(r#"{"address":{}}"#, &JsonSettings::DEFAULT);

        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.contains("address"),
            "Expected path 'address' in error: {msg}"
        );
        assert!(
            msg.contains("city"),
            "Expected field 'city' mentioned in error: {msg}"
        );
    }
}
