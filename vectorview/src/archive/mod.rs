//! Tile archive access: byte sources, container decoding, and the
//! deduplicating registry.
//!
//! An archive is addressed by a stable key (its URL, or the synthetic
//! [`DROPPED_KEY`] for a user-supplied file). The [`ArchiveRegistry`] owns
//! every open [`ArchiveHandle`]; other components only borrow them.

mod error;
mod format;
mod handle;
mod metadata;
mod registry;
mod source;

pub use error::ArchiveError;
pub use format::{parse_header, ArchiveHeader, Compression, HEADER_LEN, MAGIC, SPEC_VERSION};
pub use handle::{ArchiveHandle, DROPPED_KEY};
pub use metadata::{ArchiveMetadata, BUILD_TIME_KEY, VERSION_KEY};
pub use registry::ArchiveRegistry;
pub use source::{ArchiveSource, ByteSource, HttpByteSource, MemoryByteSource};

#[cfg(test)]
pub(crate) use format::tests::build_header_bytes;
