//! Document identifiers.
//!
//! Documents are keyed by opaque strings. IDs minted by a resource are
//! lower-case UUID v4 strings; [`is_uuid_string`] and
//! [`DocumentId::parse_uuid`] validate IDs arriving from outside.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::error::{Error, Result};

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("4"));
static UUID_V5: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("5"));
static UUID_ANY: LazyLock<Regex> = LazyLock::new(|| uuid_pattern("(4|5)"));

#[allow(clippy::unwrap_used)]
fn uuid_pattern(version: &str) -> Regex {
    // The pattern is a compile-time constant apart from the version group.
    Regex::new(&format!(
        "(?i)^[0-9a-f]{{8}}-[0-9a-f]{{4}}-{version}[0-9a-f]{{3}}-[89ab][0-9a-f]{{3}}-[0-9a-f]{{12}}$"
    ))
    .unwrap()
}

/// UUID version accepted by [`is_uuid_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UuidVersion {
    /// Random UUIDs
    V4,
    /// Name-based (SHA-1) UUIDs
    V5,
    /// Either of the above
    #[default]
    Any,
}

/// Checks if a value is a valid string representation of a UUID.
///
/// # Examples
///
/// ```
/// use docket_core::id::{is_uuid_string, UuidVersion};
///
/// assert!(is_uuid_string("1b4e28ba-2fa1-41d2-883f-0016d3cca427", UuidVersion::V4));
/// assert!(!is_uuid_string("1b4e28ba-2fa1-41d2-883f-0016d3cca427", UuidVersion::V5));
/// assert!(!is_uuid_string("not-a-uuid", UuidVersion::Any));
/// ```
pub fn is_uuid_string(value: &str, version: UuidVersion) -> bool {
    if value.len() < 32 || value.len() > 36 {
        return false;
    }
    let pattern = match version {
        UuidVersion::V4 => &*UUID_V4,
        UuidVersion::V5 => &*UUID_V5,
        UuidVersion::Any => &*UUID_ANY,
    };
    pattern.is_match(value)
}

/// Identifier of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a document ID from any string, without validation.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random ID (lower-case UUID v4).
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_core::id::{is_uuid_string, DocumentId, UuidVersion};
    ///
    /// let id = DocumentId::generate();
    /// assert!(is_uuid_string(id.as_str(), UuidVersion::V4));
    /// ```
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parses a UUID string of the given version, normalizing to lower case.
    ///
    /// Fails with [`Error::BadRequest`] if the string is not a valid UUID.
    pub fn parse_uuid(value: &str, version: UuidVersion) -> Result<Self> {
        if !is_uuid_string(value, version) {
            return Err(Error::bad_request(format!("Not a valid UUID: {value}")));
        }
        Ok(Self(value.to_lowercase()))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts into the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Uuid> for DocumentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
