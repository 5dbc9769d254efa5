//! Archive container header decoding.
//!
//! Archives use the PMTiles v3 container layout: a fixed 127-byte
//! little-endian header followed by directory, metadata, and tile sections.
//! Only the header and the JSON metadata section are decoded here; directory
//! traversal and tile payloads belong to the rendering pipeline.

use super::error::ArchiveError;
use crate::geo::Bounds;
use std::io::Read;

/// Magic bytes at the start of every archive.
pub const MAGIC: &[u8; 7] = b"PMTiles";

/// Container spec version this viewer understands.
pub const SPEC_VERSION: u8 = 3;

/// Fixed header length in bytes.
pub const HEADER_LEN: u64 = 127;

/// Compression applied to a section of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Stored uncompressed
    None,
    /// Gzip (RFC 1952)
    Gzip,
    /// Unrecognized compression id
    Unknown(u8),
}

impl Compression {
    fn from_byte(b: u8) -> Self {
        match b {
            // 0 means "unknown" in the container spec; 1 means none.
            0 | 1 => Compression::None,
            2 => Compression::Gzip,
            other => Compression::Unknown(other),
        }
    }
}

/// Decoded archive header.
///
/// Spatial bounds and zoom range drive the fit-to-bounds viewport; the
/// section table drives metadata retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveHeader {
    /// Container spec version
    pub spec_version: u8,
    /// Offset of the JSON metadata section
    pub metadata_offset: u64,
    /// Length of the JSON metadata section (0 if absent)
    pub metadata_length: u64,
    /// Compression of directories and metadata
    pub internal_compression: Compression,
    /// Compression of tile payloads
    pub tile_compression: Compression,
    /// Tile payload type id (1 = vector per the container spec)
    pub tile_type: u8,
    /// Minimum zoom with tiles
    pub min_zoom: u8,
    /// Maximum zoom with tiles
    pub max_zoom: u8,
    /// Geographic extent of the tileset
    pub bounds: Bounds,
    /// Suggested initial zoom
    pub center_zoom: u8,
    /// Suggested initial longitude
    pub center_lon: f64,
    /// Suggested initial latitude
    pub center_lat: f64,
}

fn read_u64(bytes: &[u8], offset: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(buf)
}

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[offset..offset + 4]);
    i32::from_le_bytes(buf)
}

/// Degrees from an E7-scaled fixed-point value.
#[inline]
fn e7_to_degrees(raw: i32) -> f64 {
    f64::from(raw) / 1e7
}

/// Parse the fixed header from the first [`HEADER_LEN`] bytes of an archive.
pub fn parse_header(bytes: &[u8]) -> Result<ArchiveHeader, ArchiveError> {
    if bytes.len() < HEADER_LEN as usize {
        return Err(ArchiveError::InvalidFormat(format!(
            "header truncated: {} bytes, need {}",
            bytes.len(),
            HEADER_LEN
        )));
    }
    if &bytes[0..7] != MAGIC {
        return Err(ArchiveError::InvalidFormat(
            "bad magic, not a tile archive".to_string(),
        ));
    }
    let spec_version = bytes[7];
    if spec_version != SPEC_VERSION {
        return Err(ArchiveError::InvalidFormat(format!(
            "unsupported container spec version {}",
            spec_version
        )));
    }

    let min_lon = e7_to_degrees(read_i32(bytes, 102));
    let min_lat = e7_to_degrees(read_i32(bytes, 106));
    let max_lon = e7_to_degrees(read_i32(bytes, 110));
    let max_lat = e7_to_degrees(read_i32(bytes, 114));
    let bounds = Bounds::new(min_lon, min_lat, max_lon, max_lat)
        .map_err(|e| ArchiveError::InvalidFormat(format!("header bounds: {}", e)))?;

    Ok(ArchiveHeader {
        spec_version,
        metadata_offset: read_u64(bytes, 24),
        metadata_length: read_u64(bytes, 32),
        internal_compression: Compression::from_byte(bytes[97]),
        tile_compression: Compression::from_byte(bytes[98]),
        tile_type: bytes[99],
        min_zoom: bytes[100],
        max_zoom: bytes[101],
        bounds,
        center_zoom: bytes[118],
        center_lon: e7_to_degrees(read_i32(bytes, 119)),
        center_lat: e7_to_degrees(read_i32(bytes, 123)),
    })
}

/// Decompress a metadata section according to the header's compression flag.
pub fn decompress_section(compression: Compression, bytes: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    match compression {
        Compression::None => Ok(bytes.to_vec()),
        Compression::Gzip => {
            let mut out = Vec::new();
            flate2::read::GzDecoder::new(bytes)
                .read_to_end(&mut out)
                .map_err(|e| ArchiveError::Metadata(format!("gzip: {}", e)))?;
            Ok(out)
        }
        Compression::Unknown(id) => Err(ArchiveError::Metadata(format!(
            "unsupported compression id {}",
            id
        ))),
    }
}
