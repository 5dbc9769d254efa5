//! A single opened tile archive.

use super::error::ArchiveError;
use super::format::{self, ArchiveHeader, HEADER_LEN};
use super::metadata::ArchiveMetadata;
use super::source::{ArchiveSource, ByteSource, HttpByteSource, MemoryByteSource};
use crate::geo::Bounds;
use bytes::Bytes;
use tokio::sync::OnceCell;
use tracing::debug;

/// Registry key under which a user-dropped local archive lives.
///
/// A dropped file has no URL; this synthetic identity keeps it distinct from
/// every remote archive, including remote archives with the same file name.
pub const DROPPED_KEY: &str = "dropped";

/// An opened tile archive.
///
/// Construction performs no I/O; the header and metadata are fetched on
/// first use and memoized, so repeated calls return immediately.
pub struct ArchiveHandle {
    key: String,
    source: ArchiveSource,
    header: OnceCell<ArchiveHeader>,
    metadata: OnceCell<ArchiveMetadata>,
}

impl ArchiveHandle {
    /// Open a remote archive; the URL doubles as the registry key.
    pub fn from_url(client: reqwest::Client, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            key: url.clone(),
            source: ArchiveSource::Http(HttpByteSource::new(client, url)),
            header: OnceCell::new(),
            metadata: OnceCell::new(),
        }
    }

    /// Open a dropped local archive under the [`DROPPED_KEY`] identity.
    pub fn from_dropped(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            key: DROPPED_KEY.to_string(),
            source: ArchiveSource::Memory(MemoryByteSource::new(name, data)),
            header: OnceCell::new(),
            metadata: OnceCell::new(),
        }
    }

    /// Open an archive from an explicit key and source.
    pub fn new(key: impl Into<String>, source: ArchiveSource) -> Self {
        Self {
            key: key.into(),
            source,
            header: OnceCell::new(),
            metadata: OnceCell::new(),
        }
    }

    /// Stable identity of this archive.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The decoded container header, fetched once.
    pub async fn header(&self) -> Result<&ArchiveHeader, ArchiveError> {
        self.header
            .get_or_try_init(|| async {
                let bytes = self.source.read_range(0, HEADER_LEN).await?;
                let header = format::parse_header(&bytes)?;
                debug!(
                    key = %self.key,
                    source = self.source.describe(),
                    min_zoom = header.min_zoom,
                    max_zoom = header.max_zoom,
                    "archive header loaded"
                );
                Ok(header)
            })
            .await
    }

    /// The metadata document, fetched once.
    ///
    /// Archives without a metadata section yield an empty document.
    pub async fn metadata(&self) -> Result<&ArchiveMetadata, ArchiveError> {
        let header = self.header().await?;
        self.metadata
            .get_or_try_init(|| async {
                if header.metadata_length == 0 {
                    return Ok(ArchiveMetadata::empty());
                }
                let raw = self
                    .source
                    .read_range(header.metadata_offset, header.metadata_length)
                    .await?;
                let bytes = format::decompress_section(header.internal_compression, &raw)?;
                ArchiveMetadata::from_json_bytes(&bytes)
            })
            .await
    }

    /// Geographic extent from the header.
    pub async fn bounds(&self) -> Result<Bounds, ArchiveError> {
        Ok(self.header().await?.bounds)
    }

    /// Raw byte range, as served to the tile-protocol intercept.
    pub async fn read_range(&self, offset: u64, length: u64) -> Result<Bytes, ArchiveError> {
        self.source.read_range(offset, length).await
    }
}

impl std::fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("key", &self.key)
            .field("source", &self.source.describe())
            .field("header_loaded", &self.header.initialized())
            .field("metadata_loaded", &self.metadata.initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::format::tests::build_header_bytes;

    /// A complete in-memory archive: header + plain JSON metadata.
    fn archive_bytes(metadata_json: &[u8]) -> Vec<u8> {
        let mut bytes = build_header_bytes(
            HEADER_LEN,
            metadata_json.len() as u64,
            1,
            (11.0, -13.5, 31.0, 5.4),
            (0, 14),
        );
        bytes.extend_from_slice(metadata_json);
        bytes
    }

    #[tokio::test]
    async fn header_is_memoized() {
        let handle = ArchiveHandle::from_dropped("a.pmtiles", archive_bytes(b"{}"));
        let first = handle.header().await.unwrap().clone();
        let second = handle.header().await.unwrap();
        assert_eq!(&first, second);
        assert_eq!(first.min_zoom, 0);
        assert_eq!(first.max_zoom, 14);
    }

    #[tokio::test]
    async fn metadata_reads_the_declared_section() {
        let handle = ArchiveHandle::from_dropped(
            "a.pmtiles",
            archive_bytes(br#"{"version": "3.0.0", "name": "drc-basemap"}"#),
        );
        let meta = handle.metadata().await.unwrap();
        assert_eq!(meta.version(), Some("3.0.0"));
        assert_eq!(meta.name(), Some("drc-basemap"));
    }

    #[tokio::test]
    async fn missing_metadata_section_is_empty_document() {
        let bytes = build_header_bytes(0, 0, 1, (0.0, 0.0, 1.0, 1.0), (0, 10));
        let handle = ArchiveHandle::from_dropped("bare.pmtiles", bytes);
        let meta = handle.metadata().await.unwrap();
        assert!(meta.is_empty());
    }

    #[tokio::test]
    async fn bounds_come_from_header() {
        let handle = ArchiveHandle::from_dropped("a.pmtiles", archive_bytes(b"{}"));
        let bounds = handle.bounds().await.unwrap();
        assert!((bounds.min_lon - 11.0).abs() < 1e-6);
        assert!((bounds.max_lat - 5.4).abs() < 1e-6);
    }

    #[tokio::test]
    async fn truncated_archive_surfaces_open_failure() {
        let handle = ArchiveHandle::from_dropped("broken.pmtiles", vec![0u8; 16]);
        assert!(handle.header().await.is_err());
    }

    #[test]
    fn dropped_handle_uses_synthetic_key() {
        let handle = ArchiveHandle::from_dropped("whatever.pmtiles", vec![]);
        assert_eq!(handle.key(), DROPPED_KEY);
    }
}
