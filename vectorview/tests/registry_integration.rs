//! Integration tests for the archive registry and the tile-protocol
//! intercept: deduplication, local-file replacement, and byte resolution.
//!
//! Run with: `cargo test --test registry_integration`

mod common;

use std::sync::Arc;

use vectorview::archive::{
    ArchiveHandle, ArchiveRegistry, ArchiveSource, MemoryByteSource, DROPPED_KEY,
};
use vectorview::protocol::TileProtocol;

fn memory_handle(key: &str, name: &str, bytes: Vec<u8>) -> ArchiveHandle {
    ArchiveHandle::new(key, ArchiveSource::Memory(MemoryByteSource::new(name, bytes)))
}

#[tokio::test]
async fn same_key_yields_same_handle_for_different_openers() {
    let registry = ArchiveRegistry::new();
    let bytes = common::archive(r#"{"version": "3.0.0"}"#, (0.0, 0.0, 10.0, 10.0), (0, 12));

    let first = registry
        .get_or_create("https://tiles.example.org/a.pmtiles", || {
            Ok(memory_handle("https://tiles.example.org/a.pmtiles", "first", bytes.clone()))
        })
        .unwrap();
    let second = registry
        .get_or_create("https://tiles.example.org/a.pmtiles", || {
            panic!("opener must not run for a registered key")
        })
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second));

    // The memoized header is shared: fetch through one reference, observe
    // initialization through the other.
    let header = first.header().await.unwrap();
    assert_eq!(header.max_zoom, 12);
    assert_eq!(second.header().await.unwrap(), header);
}

#[tokio::test]
async fn dropped_archive_displaces_remote_of_same_display_name() {
    let registry = Arc::new(ArchiveRegistry::new());

    // A "remote" archive whose first metadata byte pattern we can recognize.
    let remote_bytes = common::archive(r#"{"name": "remote"}"#, (0.0, 0.0, 1.0, 1.0), (0, 8));
    registry
        .get_or_create(DROPPED_KEY, || {
            Ok(memory_handle(DROPPED_KEY, "basemap.pmtiles", remote_bytes))
        })
        .unwrap();

    // The user drops a local file that happens to share the display name.
    let local_bytes = common::archive(r#"{"name": "local"}"#, (5.0, 5.0, 6.0, 6.0), (0, 10));
    registry.replace(ArchiveHandle::from_dropped("basemap.pmtiles", local_bytes.clone()));

    // Protocol lookups now resolve to the dropped archive's bytes.
    let protocol = TileProtocol::new(Arc::clone(&registry));
    let served = protocol
        .fetch_range("vectorview://dropped", 0, local_bytes.len() as u64)
        .await
        .unwrap();
    assert_eq!(&served[..], &local_bytes[..]);

    let handle = registry.get(DROPPED_KEY).unwrap();
    let meta = handle.metadata().await.unwrap();
    assert_eq!(meta.name(), Some("local"));
}

#[tokio::test]
async fn gzip_compressed_metadata_is_decoded() {
    let registry = ArchiveRegistry::new();
    let bytes = common::gzipped_archive(
        r#"{"version": "2.4.0", "attribution": "© Example"}"#,
        (12.0, -13.0, 31.0, 5.0),
        (2, 14),
    );
    let handle = registry
        .get_or_create("gz", || Ok(memory_handle("gz", "gz.pmtiles", bytes)))
        .unwrap();

    let meta = handle.metadata().await.unwrap();
    assert_eq!(meta.version(), Some("2.4.0"));
    assert_eq!(meta.attribution(), Some("© Example"));
    assert_eq!(meta.semantic_version().unwrap().minor, 4);
}

#[tokio::test]
async fn removal_releases_the_key_for_reopening() {
    let registry = ArchiveRegistry::new();
    let bytes = common::archive("{}", (0.0, 0.0, 1.0, 1.0), (0, 8));

    let first = registry
        .get_or_create("k", || Ok(memory_handle("k", "one", bytes.clone())))
        .unwrap();
    assert!(registry.remove("k").is_some());

    let second = registry
        .get_or_create("k", || Ok(memory_handle("k", "two", bytes)))
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn protocol_rejects_unregistered_and_foreign_references() {
    let registry = Arc::new(ArchiveRegistry::new());
    let protocol = TileProtocol::new(Arc::clone(&registry));

    assert!(protocol
        .fetch_range("vectorview://nowhere", 0, 10)
        .await
        .is_err());
    assert!(protocol
        .fetch_range("https://example.org/a.pmtiles", 0, 10)
        .await
        .is_err());
}
