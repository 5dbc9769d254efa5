//! Style composition: the document model, named themes, published layer
//! sets, and the style/tileset compatibility check.

mod compat;
mod composer;
mod document;
mod published;
mod theme;

pub use compat::{check, version_major, CompatibilityResult, COMPATIBILITY_REFERENCE, STYLE_MAJOR};
pub use composer::{is_archive_url, ComposeRequest, SpriteMode, StyleComposer, SOURCE_ID};
pub use document::{StyleDocument, StyleLayer, StyleSource, STYLE_SPEC_VERSION};
pub use published::PublishedStyles;
pub use theme::{Theme, ThemePalette, DEFAULT_THEME};
