//! Shared fixtures for integration tests: minimal in-memory tile archives.

#![allow(dead_code)]

use flate2::write::GzEncoder;
use std::io::Write;

/// Fixed header length of the archive container.
pub const HEADER_LEN: usize = 127;

/// Build a complete in-memory archive: header plus a plain JSON metadata
/// section directly after it.
pub fn archive(metadata_json: &str, bounds: (f64, f64, f64, f64), zooms: (u8, u8)) -> Vec<u8> {
    build(metadata_json.as_bytes().to_vec(), 1, bounds, zooms)
}

/// Same as [`archive`] but with a gzip-compressed metadata section.
pub fn gzipped_archive(
    metadata_json: &str,
    bounds: (f64, f64, f64, f64),
    zooms: (u8, u8),
) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(metadata_json.as_bytes()).unwrap();
    build(encoder.finish().unwrap(), 2, bounds, zooms)
}

fn build(
    metadata: Vec<u8>,
    internal_compression: u8,
    bounds: (f64, f64, f64, f64),
    zooms: (u8, u8),
) -> Vec<u8> {
    let mut h = vec![0u8; HEADER_LEN];
    h[0..7].copy_from_slice(b"PMTiles");
    h[7] = 3;
    h[24..32].copy_from_slice(&(HEADER_LEN as u64).to_le_bytes());
    h[32..40].copy_from_slice(&(metadata.len() as u64).to_le_bytes());
    h[97] = internal_compression;
    h[98] = 2;
    h[99] = 1;
    h[100] = zooms.0;
    h[101] = zooms.1;
    let (min_lon, min_lat, max_lon, max_lat) = bounds;
    h[102..106].copy_from_slice(&((min_lon * 1e7) as i32).to_le_bytes());
    h[106..110].copy_from_slice(&((min_lat * 1e7) as i32).to_le_bytes());
    h[110..114].copy_from_slice(&((max_lon * 1e7) as i32).to_le_bytes());
    h[114..118].copy_from_slice(&((max_lat * 1e7) as i32).to_le_bytes());
    h[118] = (zooms.0 + zooms.1) / 2;
    h[119..123].copy_from_slice(&(((min_lon + max_lon) / 2.0 * 1e7) as i32).to_le_bytes());
    h[123..127].copy_from_slice(&(((min_lat + max_lat) / 2.0 * 1e7) as i32).to_le_bytes());
    h.extend_from_slice(&metadata);
    h
}
