//! Archive metadata as an open key/value document.
//!
//! Metadata is free-form JSON written by the tiling pipeline. Nothing in it
//! is guaranteed to exist; every accessor returns `Option` and callers check
//! presence before use.

use super::error::ArchiveError;
use chrono::{DateTime, FixedOffset};
use semver::Version;
use serde_json::{Map, Value};
use tracing::warn;

/// Metadata key carrying the tileset's semantic version.
pub const VERSION_KEY: &str = "version";

/// Metadata key carrying the pipeline build timestamp.
pub const BUILD_TIME_KEY: &str = "planetiler:buildtime";

/// Open key/value metadata document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveMetadata {
    doc: Map<String, Value>,
}

impl ArchiveMetadata {
    /// An empty document (valid: archives may carry no metadata section).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a metadata document from raw JSON bytes.
    ///
    /// Unparseable JSON is an archive error. A parseable non-object (the
    /// pipeline wrote something unexpected) degrades to an empty document
    /// rather than failing the open.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| ArchiveError::Metadata(format!("json: {}", e)))?;
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => {
                warn!(kind = json_kind(&other), "metadata is not an object, ignoring");
                Ok(Self::empty())
            }
        }
    }

    /// Raw value for a key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.doc.get(key)
    }

    /// String value for a key, if present and actually a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.doc.get(key).and_then(Value::as_str)
    }

    /// The tileset's declared version string, if any.
    pub fn version(&self) -> Option<&str> {
        self.get_str(VERSION_KEY)
    }

    /// The tileset version as a parsed semantic version, when it parses.
    pub fn semantic_version(&self) -> Option<Version> {
        self.version().and_then(|v| Version::parse(v).ok())
    }

    /// The pipeline build timestamp, when present and RFC 3339.
    pub fn build_time(&self) -> Option<DateTime<FixedOffset>> {
        self.get_str(BUILD_TIME_KEY)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
    }

    /// Display name of the tileset, if declared.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// Attribution text, if declared.
    pub fn attribution(&self) -> Option<&str> {
        self.get_str("attribution")
    }

    /// Number of keys in the document.
    pub fn len(&self) -> usize {
        self.doc.len()
    }

    /// Whether the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.doc.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_and_build_time_when_present() {
        let meta = ArchiveMetadata::from_json_bytes(
            br#"{"version": "2.4.1", "planetiler:buildtime": "2025-03-14T09:30:00Z", "name": "basemap"}"#,
        )
        .unwrap();

        assert_eq!(meta.version(), Some("2.4.1"));
        assert_eq!(meta.semantic_version().unwrap().major, 2);
        assert_eq!(meta.name(), Some("basemap"));
        let ts = meta.build_time().unwrap();
        assert_eq!(ts.timestamp(), 1_741_944_600);
    }

    #[test]
    fn absent_fields_are_none_not_errors() {
        let meta = ArchiveMetadata::from_json_bytes(b"{}").unwrap();
        assert!(meta.version().is_none());
        assert!(meta.build_time().is_none());
        assert!(meta.attribution().is_none());
        assert!(meta.is_empty());
    }

    #[test]
    fn wrongly_typed_fields_are_none() {
        let meta = ArchiveMetadata::from_json_bytes(br#"{"version": 7}"#).unwrap();
        assert!(meta.version().is_none());
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn non_semver_version_string_still_readable() {
        let meta = ArchiveMetadata::from_json_bytes(br#"{"version": "2024-spring"}"#).unwrap();
        assert_eq!(meta.version(), Some("2024-spring"));
        assert!(meta.semantic_version().is_none());
    }

    #[test]
    fn non_object_json_degrades_to_empty() {
        let meta = ArchiveMetadata::from_json_bytes(b"[1, 2, 3]").unwrap();
        assert!(meta.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = ArchiveMetadata::from_json_bytes(b"{not json").unwrap_err();
        assert!(matches!(err, ArchiveError::Metadata(_)));
    }
}
