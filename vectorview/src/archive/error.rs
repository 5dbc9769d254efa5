//! Error types for archive access.

use thiserror::Error;

/// Errors that can occur while opening or reading a tile archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// HTTP request failed
    #[error("Archive request failed: {0}")]
    Http(String),

    /// Host answered a range request without honoring the range
    #[error("Range requests not supported by {url} (HTTP {status})")]
    RangeNotSupported {
        /// HTTP status the host returned
        status: u16,
        /// Requested URL
        url: String,
    },

    /// Read past the end of a local byte source
    #[error("Read out of range: offset={offset} length={length} size={size}")]
    OutOfRange {
        offset: u64,
        length: u64,
        size: u64,
    },

    /// Archive bytes do not form a valid container
    #[error("Invalid archive: {0}")]
    InvalidFormat(String),

    /// Metadata section could not be decoded
    #[error("Invalid archive metadata: {0}")]
    Metadata(String),

    /// No archive is registered under the requested key
    #[error("No archive registered for key '{0}'")]
    UnknownKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_key() {
        let err = ArchiveError::UnknownKey("basemap".to_string());
        assert!(err.to_string().contains("basemap"));
    }

    #[test]
    fn display_includes_range_details() {
        let err = ArchiveError::OutOfRange {
            offset: 10,
            length: 20,
            size: 15,
        };
        let msg = err.to_string();
        assert!(msg.contains("offset=10"));
        assert!(msg.contains("size=15"));
    }
}
