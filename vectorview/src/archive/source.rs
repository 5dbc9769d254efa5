//! Byte sources backing an archive handle.
//!
//! An archive is read through ranged requests against either a remote URL or
//! an in-memory buffer supplied by the user (a dropped file). The handle is
//! agnostic to which; dispatch is by enum rather than trait object so the
//! registry can hold sources of either kind without boxing.

use super::error::ArchiveError;
use bytes::Bytes;
use std::future::Future;
use tracing::{trace, warn};

/// Trait for ranged byte access to an archive.
pub trait ByteSource: Send + Sync {
    /// Reads `length` bytes starting at `offset`.
    ///
    /// # Returns
    ///
    /// Exactly the requested range, or an error. Short reads are errors.
    fn read_range(
        &self,
        offset: u64,
        length: u64,
    ) -> impl Future<Output = Result<Bytes, ArchiveError>> + Send;

    /// Human-readable description for logging.
    fn describe(&self) -> &str;
}

/// Remote archive read via HTTP range requests.
#[derive(Debug, Clone)]
pub struct HttpByteSource {
    client: reqwest::Client,
    url: String,
}

impl HttpByteSource {
    /// Create a source reading `url` with the given shared client.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The archive URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ByteSource for HttpByteSource {
    async fn read_range(&self, offset: u64, length: u64) -> Result<Bytes, ArchiveError> {
        if length == 0 {
            return Ok(Bytes::new());
        }
        let end = offset + length - 1;
        trace!(url = %self.url, offset, length, "archive range request");

        let response = self
            .client
            .get(&self.url)
            .header("Range", format!("bytes={}-{}", offset, end))
            .send()
            .await
            .map_err(|e| {
                warn!(url = %self.url, error = %e, "archive range request failed");
                ArchiveError::Http(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if status.as_u16() != 206 {
            // A 200 means the host ignored the Range header; anything else
            // is a plain failure. Both are unusable for archive access.
            warn!(url = %self.url, status = status.as_u16(), "range request not honored");
            return Err(ArchiveError::RangeNotSupported {
                status: status.as_u16(),
                url: self.url.clone(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ArchiveError::Http(format!("Failed to read response: {}", e)))?;

        if (body.len() as u64) < length {
            return Err(ArchiveError::Http(format!(
                "Short read from {}: wanted {} bytes, got {}",
                self.url,
                length,
                body.len()
            )));
        }

        Ok(body.slice(0..length as usize))
    }

    fn describe(&self) -> &str {
        &self.url
    }
}

/// In-memory archive, typically a file the user dropped onto the viewer.
#[derive(Debug, Clone)]
pub struct MemoryByteSource {
    name: String,
    data: Bytes,
}

impl MemoryByteSource {
    /// Wrap a byte buffer under a display name.
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Total size in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl ByteSource for MemoryByteSource {
    async fn read_range(&self, offset: u64, length: u64) -> Result<Bytes, ArchiveError> {
        let size = self.data.len() as u64;
        let end = offset.checked_add(length).ok_or(ArchiveError::OutOfRange {
            offset,
            length,
            size,
        })?;
        if end > size {
            return Err(ArchiveError::OutOfRange {
                offset,
                length,
                size,
            });
        }
        Ok(self.data.slice(offset as usize..end as usize))
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

/// A byte source of either kind.
#[derive(Debug, Clone)]
pub enum ArchiveSource {
    /// Remote archive over ranged HTTP
    Http(HttpByteSource),
    /// Local in-memory archive
    Memory(MemoryByteSource),
}

impl ByteSource for ArchiveSource {
    async fn read_range(&self, offset: u64, length: u64) -> Result<Bytes, ArchiveError> {
        match self {
            ArchiveSource::Http(s) => s.read_range(offset, length).await,
            ArchiveSource::Memory(s) => s.read_range(offset, length).await,
        }
    }

    fn describe(&self) -> &str {
        match self {
            ArchiveSource::Http(s) => s.describe(),
            ArchiveSource::Memory(s) => s.describe(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_source_reads_exact_range() {
        let source = MemoryByteSource::new("local", vec![0u8, 1, 2, 3, 4, 5, 6, 7]);
        let bytes = source.read_range(2, 3).await.unwrap();
        assert_eq!(&bytes[..], &[2, 3, 4]);
    }

    #[tokio::test]
    async fn memory_source_rejects_read_past_end() {
        let source = MemoryByteSource::new("local", vec![0u8; 4]);
        let err = source.read_range(2, 10).await.unwrap_err();
        match err {
            ArchiveError::OutOfRange { size, .. } => assert_eq!(size, 4),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn memory_source_rejects_offset_overflow() {
        let source = MemoryByteSource::new("local", vec![0u8; 4]);
        let err = source.read_range(u64::MAX, 2).await.unwrap_err();
        assert!(matches!(err, ArchiveError::OutOfRange { .. }));
    }

    #[tokio::test]
    async fn enum_dispatch_reaches_memory_variant() {
        let source = ArchiveSource::Memory(MemoryByteSource::new("local", vec![9u8, 8, 7]));
        let bytes = source.read_range(0, 2).await.unwrap();
        assert_eq!(&bytes[..], &[9, 8]);
        assert_eq!(source.describe(), "local");
    }
}
