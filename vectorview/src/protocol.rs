//! Tile-protocol intercept.
//!
//! The rendering engine fetches archive bytes through a custom URL scheme
//! instead of plain HTTP. A [`TileProtocol`] resolves `vectorview://{key}`
//! references through the registry it was constructed with and serves the
//! requested byte range. It is an explicitly owned object: the view session
//! creates it at mount and drops it at unmount; there is no module-level
//! protocol state.

use crate::archive::{ArchiveError, ArchiveRegistry};
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// URL scheme the intercept is registered under.
pub const SCHEME: &str = "vectorview";

/// Qualify an archive key with the tile-protocol scheme.
pub fn scheme_url(key: &str) -> String {
    format!("{}://{}", SCHEME, key)
}

/// Strip the scheme from a protocol reference, if it carries one.
pub fn parse_reference(reference: &str) -> Option<&str> {
    reference.strip_prefix(SCHEME)?.strip_prefix("://")
}

/// Errors the protocol intercept reports to the rendering engine.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reference does not use the intercept's scheme
    #[error("Not a {SCHEME}:// reference: {0}")]
    ForeignScheme(String),

    /// Archive lookup or read failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// The intercept handler handed to the rendering engine.
pub struct TileProtocol {
    registry: Arc<ArchiveRegistry>,
}

impl TileProtocol {
    /// Create an intercept consulting `registry`.
    pub fn new(registry: Arc<ArchiveRegistry>) -> Self {
        Self { registry }
    }

    /// Serve a byte range for a `vectorview://{key}` reference.
    ///
    /// The key must name a registered archive; registration is what makes a
    /// reference resolvable during rendering.
    pub async fn fetch_range(
        &self,
        reference: &str,
        offset: u64,
        length: u64,
    ) -> Result<Bytes, ProtocolError> {
        let key = parse_reference(reference)
            .ok_or_else(|| ProtocolError::ForeignScheme(reference.to_string()))?;
        let handle = self
            .registry
            .get(key)
            .ok_or_else(|| ArchiveError::UnknownKey(key.to_string()))?;
        trace!(key, offset, length, "protocol range fetch");
        Ok(handle.read_range(offset, length).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveHandle;

    #[test]
    fn scheme_url_round_trips() {
        let url = scheme_url("dropped");
        assert_eq!(url, "vectorview://dropped");
        assert_eq!(parse_reference(&url), Some("dropped"));
    }

    #[test]
    fn foreign_scheme_is_rejected() {
        assert_eq!(parse_reference("https://example.org/x.pmtiles"), None);
    }

    #[tokio::test]
    async fn fetch_resolves_through_registry() {
        let registry = Arc::new(ArchiveRegistry::new());
        registry
            .get_or_create("mem", || {
                Ok(ArchiveHandle::new(
                    "mem",
                    crate::archive::ArchiveSource::Memory(
                        crate::archive::MemoryByteSource::new("mem", vec![1u8, 2, 3, 4, 5]),
                    ),
                ))
            })
            .unwrap();

        let protocol = TileProtocol::new(Arc::clone(&registry));
        let bytes = protocol
            .fetch_range("vectorview://mem", 1, 3)
            .await
            .unwrap();
        assert_eq!(&bytes[..], &[2, 3, 4]);
    }

    #[tokio::test]
    async fn unknown_key_is_an_error() {
        let protocol = TileProtocol::new(Arc::new(ArchiveRegistry::new()));
        let err = protocol
            .fetch_range("vectorview://missing", 0, 1)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
