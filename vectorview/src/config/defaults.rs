//! Default configuration values.

use std::path::PathBuf;

/// Static byte-range server of the self-hosted stack.
pub const DEFAULT_SELF_HOSTED_STATIC: &str = "http://localhost:8080";

/// Dynamic tile generator of the self-hosted stack.
pub const DEFAULT_SELF_HOSTED_DYNAMIC: &str = "http://localhost:3000";

/// Health check of the self-hosted stack.
pub const DEFAULT_SELF_HOSTED_HEALTH: &str = "http://localhost:8080/health";

/// Public fallback host (static archives only).
pub const DEFAULT_FALLBACK_STATIC: &str = "https://tiles.vectorview.org";

/// Versioned sprite/glyph/style asset base.
pub const DEFAULT_ASSETS_BASE: &str = "https://assets.vectorview.org";

/// Archive served under the static path when no source is pinned.
pub const DEFAULT_ARCHIVE_NAME: &str = "basemap.pmtiles";

/// Health probe timeout in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;

/// Path of the config directory (`~/.vectorview`).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".vectorview")
}

/// Path of the config file (`~/.vectorview/config.ini`).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
