//! User-controllable view parameters.

use crate::style::DEFAULT_THEME;

/// Language used for labels when the fragment names none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Which tile source the view draws from.
///
/// The three variants are mutually exclusive: absent (use the resolved
/// default), an explicit URL, or the user-dropped local archive. The codec
/// keeps `Dropped` distinct from absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TileSourceRef {
    /// No explicit source; resolve endpoints and use the default archive
    #[default]
    Default,
    /// Explicit archive URL or tile-endpoint template
    Url(String),
    /// The user-dropped local archive
    Dropped,
}

impl TileSourceRef {
    /// Whether this is the default (absent) source.
    pub fn is_default(&self) -> bool {
        matches!(self, TileSourceRef::Default)
    }
}

/// The complete set of user-controllable view parameters.
///
/// Everything here round-trips through the URL fragment; fields equal to
/// their defaults are omitted from the encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Visual theme name
    pub theme: String,
    /// Label language code
    pub language: String,
    /// Tile source selection
    pub source: TileSourceRef,
    /// Use locally hosted sprite sheets instead of the asset base
    pub local_sprites: bool,
    /// Draw tile boundaries and collision boxes
    pub debug_overlays: bool,
    /// Pinned published style version, if any
    pub style_version: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            source: TileSourceRef::Default,
            local_sprites: false,
            debug_overlays: false,
            style_version: None,
        }
    }
}

impl ViewState {
    /// Whether every field holds its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
