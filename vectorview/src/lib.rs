//! VectorView - map-tile viewing client core
//!
//! Decides at runtime where vector tile data comes from (a self-hosted
//! range-serving stack vs. a static fallback host), deduplicates opened tile
//! archives, composes renderable style documents from named themes, checks
//! style/tileset version compatibility, and round-trips the whole view state
//! through a shareable URL fragment.
//!
//! # High-Level API
//!
//! Most consumers drive everything through a [`viewer::ViewSession`]:
//!
//! ```ignore
//! use vectorview::config::ViewerConfig;
//! use vectorview::viewer::ViewSession;
//!
//! let session = ViewSession::new(ViewerConfig::load()?)?;
//! let stamp = session.apply_fragment(page_fragment);
//! if let Some(view) = session.recompose_at(stamp).await {
//!     // hand view.style + view.bounds to the rendering engine,
//!     // register session.protocol() as the tile-fetch intercept
//! }
//! ```

pub mod archive;
pub mod config;
pub mod endpoint;
pub mod feature;
pub mod geo;
pub mod interact;
pub mod logging;
pub mod protocol;
pub mod state;
pub mod style;
pub mod viewer;

/// Version of the VectorView library and CLI.
///
/// Synchronized across all workspace members via `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
