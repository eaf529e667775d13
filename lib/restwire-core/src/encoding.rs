//! Character encodings for text payloads.

use bytes::Bytes;

use crate::{Error, Result};

/// Character encoding used to turn JSON text into bytes and back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8 (`utf-8`).
    #[default]
    Utf8,
    /// UTF-16, little endian (`utf-16le`).
    Utf16Le,
    /// UTF-16, big endian (`utf-16be`).
    Utf16Be,
}

impl Encoding {
    /// The charset label, as used in a `Content-Type` header.
    #[must_use]
    pub const fn charset(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
        }
    }

    /// Look up an encoding by charset label (case-insensitive).
    ///
    /// `utf-16` without an explicit byte order maps to big endian.
    #[must_use]
    pub fn from_charset(label: &str) -> Option<Self> {
        let label = label.trim().trim_matches('"');
        if label.eq_ignore_ascii_case("utf-8") || label.eq_ignore_ascii_case("utf8") {
            Some(Self::Utf8)
        } else if label.eq_ignore_ascii_case("utf-16le") {
            Some(Self::Utf16Le)
        } else if label.eq_ignore_ascii_case("utf-16be") || label.eq_ignore_ascii_case("utf-16")
        {
            Some(Self::Utf16Be)
        } else {
            None
        }
    }

    /// Encode text into bytes.
    #[must_use]
    pub fn encode(&self, text: &str) -> Bytes {
        match self {
            Self::Utf8 => Bytes::copy_from_slice(text.as_bytes()),
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        }
    }

    /// Decode bytes into text.
    ///
    /// A leading byte order mark is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the bytes are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 => {
                let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|e| Error::invalid_encoding(self.charset(), e.to_string()))
            }
            Self::Utf16Le => self.decode_utf16(bytes, b"\xFF\xFE", u16::from_le_bytes),
            Self::Utf16Be => self.decode_utf16(bytes, b"\xFE\xFF", u16::from_be_bytes),
        }
    }

    fn decode_utf16(
        &self,
        bytes: &[u8],
        bom: &[u8],
        to_unit: fn([u8; 2]) -> u16,
    ) -> Result<String> {
        let bytes = bytes.strip_prefix(bom).unwrap_or(bytes);
        let (pairs, remainder) = bytes.as_chunks::<2>();
        if !remainder.is_empty() {
            return Err(Error::invalid_encoding(
                self.charset(),
                "odd number of bytes",
            ));
        }

        char::decode_utf16(pairs.iter().map(|pair| to_unit(*pair)))
            .collect::<std::result::Result<String, _>>()
            .map_err(|e| Error::invalid_encoding(self.charset(), e.to_string()))
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.charset())
    }
}
