//! Query string composition and parsing.
//!
//! [`QueryStringBuilder`] accumulates `key=value` fragments in insertion
//! order; [`QueryStringBuilder::build_query`] turns a snapshot of them into an
//! immutable [`QueryString`], optionally sorted and collated.
//!
//! # Example
//!
//! ```
//! use restwire_core::QueryStringBuilder;
//!
//! let mut builder = QueryStringBuilder::new();
//! builder.add("tag", "rust")?.add("page", "2")?.add("tag", "http")?;
//!
//! assert_eq!(builder.build().query(), "page=2&tag=rust&tag=http");
//! assert_eq!(builder.build_query(false, Some(",")).query(), "tag=rust%2Chttp&page=2");
//! # Ok::<(), restwire_core::Error>(())
//! ```

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::{Error, Result};

/// Everything but RFC 3986 unreserved characters is escaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A single `key=value` pair, unencoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    key: String,
    value: String,
}

impl Fragment {
    /// Creates a fragment without validation.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Fragment key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fragment value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn encode(&self) -> String {
        format!(
            "{}={}",
            utf8_percent_encode(&self.key, QUERY_COMPONENT),
            utf8_percent_encode(&self.value, QUERY_COMPONENT)
        )
    }
}

// ============================================================================
// Query String
// ============================================================================

/// An immutable, ordered set of fragments.
///
/// The serialized form never includes the leading `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    fragments: Vec<Fragment>,
}

impl QueryString {
    /// A query string without fragments.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// Returns `true` if there is at least one fragment.
    #[must_use]
    pub fn has_items(&self) -> bool {
        !self.fragments.is_empty()
    }

    /// Number of fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` if there are no fragments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Fragments in serialization order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// URL-encoded `k=v&k=v` form, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> String {
        self.fragments
            .iter()
            .map(Fragment::encode)
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Same as [`QueryString::query`].
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.query()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

// ============================================================================
// Query String Builder
// ============================================================================

/// Mutable accumulator of query fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStringBuilder {
    fragments: Vec<Fragment>,
}

impl QueryStringBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// Parse an existing query string.
    ///
    /// - an empty input gives an empty builder
    /// - a single leading `?` is dropped
    /// - empty fragments (`a=1&&b=2`) are skipped
    /// - each fragment is split on its first `=`; a fragment without `=` is a
    ///   key with an empty value
    /// - keys and values are URL-decoded (`%XX` and `+` for space)
    ///
    /// Parsed fragments are not validated, so empty values survive.
    #[must_use]
    pub fn parse_query(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let fragments = raw
            .split('&')
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| {
                let (key, value) = fragment.split_once('=').unwrap_or((fragment, ""));
                Fragment::new(decode(key), decode(value))
            })
            .collect();

        Self { fragments }
    }

    /// Build from pairs, validating each one like [`QueryStringBuilder::add`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] on the first empty key or value.
    pub fn try_from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = Self::new();
        for (key, value) in pairs {
            builder.add(key, value)?;
        }
        Ok(builder)
    }

    /// Append pairs, validating each one like [`QueryStringBuilder::add`].
    ///
    /// Nothing is appended when a pair is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] on the first empty key or value.
    pub fn try_extend<K, V>(&mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Result<&mut Self>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let validated = Self::try_from_pairs(pairs)?;
        self.fragments.extend(validated.fragments);
        Ok(self)
    }

    /// Append a fragment. Duplicate keys are kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the key or the value is empty.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<&mut Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::invalid_argument("query key must not be empty"));
        }

        let value = value.into();
        if value.is_empty() {
            return Err(Error::invalid_argument(format!(
                "query value for '{key}' must not be empty"
            )));
        }

        self.fragments.push(Fragment { key, value });
        Ok(self)
    }

    /// Append a typed value, rendered with [`QueryValue`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the key or the rendered value is empty.
    pub fn add_value<V: QueryValue + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &V,
    ) -> Result<&mut Self> {
        self.add(key, value.to_query_value())
    }

    /// Append a typed value if present; `None` is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the key or the rendered value is empty.
    pub fn add_optional<V: QueryValue>(
        &mut self,
        key: impl Into<String>,
        value: Option<&V>,
    ) -> Result<&mut Self> {
        match value {
            Some(value) => self.add_value(key, value),
            None => Ok(self),
        }
    }

    /// Returns `true` if a fragment with exactly this key (case-sensitive) exists.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.fragments.iter().any(|fragment| fragment.key == key)
    }

    /// Fragments in insertion order.
    #[must_use]
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Build with sorted keys and no collation.
    #[must_use]
    pub fn build(&self) -> QueryString {
        self.build_query(true, None)
    }

    /// Build an immutable snapshot; the builder is left untouched.
    ///
    /// - `collate_by`: when non-empty, fragments sharing a key are merged into
    ///   one, joining their values with the separator (groups keep the order
    ///   of each key's first occurrence)
    /// - `sort_keys`: stable sort by key, case-insensitive ordinal
    #[must_use]
    pub fn build_query(&self, sort_keys: bool, collate_by: Option<&str>) -> QueryString {
        let mut fragments = match collate_by.filter(|separator| !separator.is_empty()) {
            Some(separator) => collate(&self.fragments, separator),
            None => self.fragments.clone(),
        };

        if sort_keys {
            fragments.sort_by(|a, b| compare_ignore_case(&a.key, &b.key));
        }

        QueryString { fragments }
    }
}

fn decode(component: &str) -> String {
    let component = component.replace('+', " ");
    percent_decode_str(&component)
        .decode_utf8_lossy()
        .into_owned()
}

fn collate(fragments: &[Fragment], separator: &str) -> Vec<Fragment> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for fragment in fragments {
        match positions.get(fragment.key.as_str()) {
            Some(&position) => {
                if let Some((_, values)) = groups.get_mut(position) {
                    values.push(fragment.value.as_str());
                }
            }
            None => {
                positions.insert(fragment.key.as_str(), groups.len());
                groups.push((fragment.key.as_str(), vec![fragment.value.as_str()]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(key, values)| Fragment::new(key, values.join(separator)))
        .collect()
}

/// Ordinal comparison of upper-cased chars; a char whose upper case spans
/// several chars (`ß`) is compared as is.
fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().map(fold_case).cmp(b.chars().map(fold_case))
}

fn fold_case(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

// ============================================================================
// Typed Values
// ============================================================================

/// Types that render as a query value.
///
/// Booleans render as `true`/`false`, numbers and text through `Display`.
pub trait QueryValue {
    /// Render the value.
    fn to_query_value(&self) -> String;
}

impl QueryValue for str {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> String {
        self.clone()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}

macro_rules! display_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_query_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn builder(pairs: &[(&str, &str)]) -> QueryStringBuilder {
        QueryStringBuilder::try_from_pairs(pairs.iter().copied()).expect("valid pairs")
    }

    #[test]
    fn has_key_after_add() {
        let mut builder = QueryStringBuilder::new();
        builder.add("id", "42").expect("add");

        check!(builder.has_key("id"));
        check!(!builder.has_key("ID"));
        check!(!builder.has_key("missing"));
    }

    #[test]
    fn add_rejects_empty_key_or_value() {
        let mut builder = QueryStringBuilder::new();

        let_assert!(Err(Error::InvalidArgument(_)) = builder.add("", "value").map(drop));
        let_assert!(Err(Error::InvalidArgument(_)) = builder.add("key", "").map(drop));
        check!(builder.fragments().is_empty());
    }

    #[test]
    fn empty_builder_builds_empty_query() {
        let query = QueryStringBuilder::new().build();

        check!(!query.has_items());
        check!(query.query() == "");
        check!(query.is_empty());
    }

    #[test]
    fn build_sorts_case_insensitively() {
        let builder = builder(&[("b", "2"), ("A", "1"), ("c", "3")]);

        let keys: Vec<_> = builder
            .build_query(true, None)
            .fragments()
            .iter()
            .map(|fragment| fragment.key().to_string())
            .collect();
        check!(keys == ["A", "b", "c"]);
    }

    #[test]
    fn build_keeps_insertion_order_without_sort() {
        let builder = builder(&[("b", "2"), ("A", "1"), ("c", "3")]);

        check!(builder.build_query(false, None).query() == "b=2&A=1&c=3");
    }

    #[test]
    fn sort_is_stable_for_duplicate_keys() {
        let builder = builder(&[("k", "2"), ("a", "x"), ("K", "1"), ("k", "0")]);

        check!(builder.build().query() == "a=x&k=2&K=1&k=0");
    }

    #[test]
    fn collate_merges_values() {
        let builder = builder(&[("k", "1"), ("k", "2")]);
        let query = builder.build_query(true, Some(","));

        check!(query.fragments() == [Fragment::new("k", "1,2")]);
        check!(query.query() == "k=1%2C2");
    }

    #[test]
    fn collate_keeps_first_occurrence_order() {
        let builder = builder(&[("z", "1"), ("a", "2"), ("z", "3")]);

        check!(builder.build_query(false, Some("|")).query() == "z=1%7C3&a=2");
    }

    #[test]
    fn empty_separator_disables_collation() {
        let builder = builder(&[("k", "1"), ("k", "2")]);

        check!(builder.build_query(true, Some("")).len() == 2);
    }

    #[test]
    fn build_is_idempotent_and_non_destructive() {
        let builder = builder(&[("b", "2"), ("a", "1"), ("b", "3")]);

        let first = builder.build();
        let second = builder.build();
        check!(first.query() == second.query());

        let collated = builder.build_query(false, Some(","));
        check!(collated.len() == 2);
        check!(builder.fragments().len() == 3);
    }

    #[test]
    fn query_encodes_keys_and_values() {
        let builder = builder(&[("full name", "Jane Doe"), ("q", "a&b=c/d?"), ("ü", "~.-_")]);

        insta::assert_snapshot!(
            builder.build_query(false, None).query(),
            @"full%20name=Jane%20Doe&q=a%26b%3Dc%2Fd%3F&%C3%BC=~.-_"
        );
    }

    #[test]
    fn display_and_to_query_string_match_query() {
        let query = builder(&[("id", "42")]).build();

        check!(query.to_string() == "id=42");
        check!(query.to_query_string() == "id=42");
    }

    #[test]
    fn parse_query_basic() {
        let builder = QueryStringBuilder::parse_query("?b=2&a=1");

        check!(builder.has_key("a"));
        check!(builder.has_key("b"));
        check!(builder.fragments() == [Fragment::new("b", "2"), Fragment::new("a", "1")]);
    }

    #[test]
    fn parse_query_empty_input() {
        check!(QueryStringBuilder::parse_query("").fragments().is_empty());
        check!(QueryStringBuilder::parse_query("?").fragments().is_empty());
        check!(QueryStringBuilder::parse_query("&&").fragments().is_empty());
    }

    #[test]
    fn parse_query_splits_on_first_equals() {
        let builder = QueryStringBuilder::parse_query("token=abc==&expr=a%3Db");

        check!(
            builder.fragments()
                == [
                    Fragment::new("token", "abc=="),
                    Fragment::new("expr", "a=b"),
                ]
        );
    }

    #[test]
    fn parse_query_bare_key_has_empty_value() {
        let builder = QueryStringBuilder::parse_query("verbose&page=1");

        check!(builder.has_key("verbose"));
        check!(builder.fragments().first() == Some(&Fragment::new("verbose", "")));
        check!(builder.build_query(false, None).query() == "verbose=&page=1");
    }

    #[test]
    fn parse_query_decodes_plus_and_percent() {
        let builder = QueryStringBuilder::parse_query("full+name=Jane%20Doe&sum=1%2B1");

        check!(
            builder.fragments()
                == [
                    Fragment::new("full name", "Jane Doe"),
                    Fragment::new("sum", "1+1"),
                ]
        );
    }

    #[test]
    fn parse_then_build_round_trip() {
        let original = builder(&[("b", "x y"), ("a", "1&2"), ("c", "ü")]).build();

        let reparsed = QueryStringBuilder::parse_query(&original.query()).build();
        check!(reparsed == original);
        check!(reparsed.query() == original.query());
    }

    #[test]
    fn typed_values() {
        let mut builder = QueryStringBuilder::new();
        builder
            .add_value("flag", &true)
            .and_then(|b| b.add_value("off", &false))
            .and_then(|b| b.add_value("count", &42_u32))
            .and_then(|b| b.add_value("ratio", &0.5_f64))
            .and_then(|b| b.add_value("name", "alice"))
            .and_then(|b| b.add_optional::<u32>("missing", None))
            .and_then(|b| b.add_optional("page", Some(&3_i64)))
            .expect("typed values");

        check!(
            builder.build_query(false, None).query()
                == "flag=true&off=false&count=42&ratio=0.5&name=alice&page=3"
        );
        check!(!builder.has_key("missing"));
    }

    #[test]
    fn typed_value_rejects_empty_key() {
        let mut builder = QueryStringBuilder::new();

        let_assert!(Err(Error::InvalidArgument(_)) = builder.add_value("", &1_u8).map(drop));
    }

    #[test]
    fn try_extend_validates_all_pairs_first() {
        let mut builder = QueryStringBuilder::new();
        builder.add("a", "1").expect("add");

        let result = builder.try_extend([("b", "2"), ("", "x")]).map(drop);
        let_assert!(Err(Error::InvalidArgument(_)) = result);
        check!(builder.build().query() == "a=1");

        builder.try_extend([("b", "2"), ("c", "3")]).expect("valid pairs");
        check!(builder.build().query() == "a=1&b=2&c=3");
    }

    #[test]
    fn case_folding_is_per_char() {
        check!(compare_ignore_case("Äpfel", "äPFEL") == Ordering::Equal);
        check!(compare_ignore_case("straße", "STRASSE") != Ordering::Equal);
        check!(compare_ignore_case("ß", "ss") != Ordering::Equal);
    }

    #[test]
    fn try_from_pairs_validates() {
        let result = QueryStringBuilder::try_from_pairs([("a", "1"), ("b", "")]);

        let_assert!(Err(Error::InvalidArgument(message)) = result);
        check!(message.contains("'b'"));
    }
}
