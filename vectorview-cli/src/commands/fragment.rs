//! `fragment` - decode a URL fragment into view state, or re-encode it.

use crate::error::CliError;
use vectorview::state::{self, TileSourceRef};

/// Decode `fragment`, print the resulting state, and show the canonical
/// re-encoding (defaults omitted, unrelated keys preserved).
pub fn run(fragment: &str) -> Result<(), CliError> {
    let decoded = state::decode(fragment);

    println!("theme:          {}", decoded.theme);
    println!("language:       {}", decoded.language);
    match &decoded.source {
        TileSourceRef::Default => println!("source:         (default)"),
        TileSourceRef::Url(url) => println!("source:         {}", url),
        TileSourceRef::Dropped => println!("source:         (dropped local archive)"),
    }
    println!("local sprites:  {}", decoded.local_sprites);
    println!("debug overlays: {}", decoded.debug_overlays);
    match &decoded.style_version {
        Some(version) => println!("style pin:      {}", version),
        None => println!("style pin:      (none)"),
    }

    println!("canonical:      #{}", state::encode(fragment, &decoded));
    Ok(())
}
