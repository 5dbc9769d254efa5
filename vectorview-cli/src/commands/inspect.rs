//! `inspect` - print an archive's header, metadata, and compatibility.

use crate::error::CliError;
use std::path::Path;
use vectorview::archive::{ArchiveHandle, ArchiveSource, MemoryByteSource};
use vectorview::style;

/// Open an archive by URL or local path and describe it.
pub async fn run(reference: &str, client: reqwest::Client) -> Result<(), CliError> {
    let handle = open(reference, client)?;

    let header = handle.header().await?;
    println!("archive:  {}", reference);
    println!("zoom:     {}..{}", header.min_zoom, header.max_zoom);
    println!(
        "bounds:   {:.5},{:.5} .. {:.5},{:.5}",
        header.bounds.min_lon, header.bounds.min_lat, header.bounds.max_lon, header.bounds.max_lat
    );
    println!(
        "center:   {:.5},{:.5} @ z{}",
        header.center_lon, header.center_lat, header.center_zoom
    );

    let metadata = handle.metadata().await?;
    match metadata.name() {
        Some(name) => println!("name:     {}", name),
        None => println!("name:     (not declared)"),
    }
    match metadata.version() {
        Some(version) => {
            println!("version:  {}", version);
            let result = style::check(style::STYLE_MAJOR, version);
            match result.message {
                Some(message) => println!("compat:   {}", message),
                None => println!("compat:   ok (style v{})", style::STYLE_MAJOR),
            }
        }
        None => println!("version:  (not declared)"),
    }
    if let Some(ts) = metadata.build_time() {
        println!("built:    {}", ts.to_rfc3339());
    }

    Ok(())
}

/// A URL becomes a ranged HTTP source; anything else is read as a file.
fn open(reference: &str, client: reqwest::Client) -> Result<ArchiveHandle, CliError> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Ok(ArchiveHandle::from_url(client, reference));
    }
    let path = Path::new(reference);
    let bytes = std::fs::read(path)?;
    Ok(ArchiveHandle::new(
        reference,
        ArchiveSource::Memory(MemoryByteSource::new(reference, bytes)),
    ))
}
