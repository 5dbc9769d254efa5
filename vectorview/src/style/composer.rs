//! Style composition.
//!
//! Builds a complete style document from a theme, a language, and a resolved
//! tile source reference. Incomplete configuration composes to an empty
//! document; the rendering engine draws a blank map rather than erroring.

use super::compat::STYLE_MAJOR;
use super::document::{StyleDocument, StyleLayer, StyleSource};
use super::theme::Theme;
use crate::archive::DROPPED_KEY;
use crate::protocol;
use tracing::debug;

/// Name of the single vector source every composed style binds.
pub const SOURCE_ID: &str = "basemap";

/// Where sprite sheets and glyphs come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteMode {
    /// Sheets served next to the page
    Local,
    /// Versioned remote asset base
    Remote,
}

/// Inputs to one composition.
#[derive(Debug, Clone)]
pub struct ComposeRequest<'a> {
    /// Theme to style with; `None` composes an empty document
    pub theme: Option<&'a Theme>,
    /// BCP 47-ish language code for labels
    pub language: &'a str,
    /// Tile source reference: an archive URL, an opaque tile-endpoint
    /// template, or the dropped-archive sentinel; `None` composes empty
    pub source_ref: Option<&'a str>,
    /// Sprite/glyph origin
    pub sprite_mode: SpriteMode,
    /// Published layer set replacing the generated stack verbatim
    pub override_layers: Option<Vec<StyleLayer>>,
}

/// Composes style documents against a configured asset base.
#[derive(Debug, Clone)]
pub struct StyleComposer {
    assets_base: String,
}

impl StyleComposer {
    /// Create a composer; `assets_base` hosts remote sprites and glyphs.
    pub fn new(assets_base: impl Into<String>) -> Self {
        Self {
            assets_base: assets_base.into(),
        }
    }

    /// Compose a style document.
    ///
    /// With both a theme and a source reference, the output carries exactly
    /// one vector source named [`SOURCE_ID`], the theme's layer stack in
    /// canonical order (or `override_layers` verbatim), and sprite/glyph
    /// URLs per `sprite_mode`. Missing theme or source yields an empty
    /// document, never an error.
    pub fn compose(&self, request: ComposeRequest<'_>) -> StyleDocument {
        let (Some(theme), Some(source_ref)) = (request.theme, request.source_ref) else {
            debug!(
                has_theme = request.theme.is_some(),
                has_source = request.source_ref.is_some(),
                "composing empty style"
            );
            return StyleDocument::empty("empty");
        };

        let mut doc = StyleDocument::empty(format!("vectorview-{}", theme.name()));
        doc.sources
            .insert(SOURCE_ID.to_string(), resolve_source(source_ref));
        doc.layers = match request.override_layers {
            Some(layers) => layers,
            None => theme.layers(request.language, SOURCE_ID),
        };
        doc.sprite = Some(self.sprite_url(request.sprite_mode, theme.name()));
        doc.glyphs = Some(self.glyph_url(request.sprite_mode));

        debug!(
            theme = theme.name(),
            language = request.language,
            layers = doc.layers.len(),
            "style composed"
        );
        doc
    }

    fn sprite_url(&self, mode: SpriteMode, theme_name: &str) -> String {
        match mode {
            SpriteMode::Local => format!("sprites/{}", theme_name),
            SpriteMode::Remote => format!(
                "{}/sprites/v{}/{}",
                self.assets_base.trim_end_matches('/'),
                STYLE_MAJOR,
                theme_name
            ),
        }
    }

    fn glyph_url(&self, mode: SpriteMode) -> String {
        match mode {
            SpriteMode::Local => "fonts/{fontstack}/{range}.pbf".to_string(),
            SpriteMode::Remote => format!(
                "{}/fonts/{{fontstack}}/{{range}}.pbf",
                self.assets_base.trim_end_matches('/')
            ),
        }
    }
}

/// Resolve a source reference to a style source.
///
/// The dropped sentinel and recognized archive URLs go through the tile
/// protocol scheme so the intercept serves their bytes; anything else is an
/// opaque tile-endpoint template used verbatim.
fn resolve_source(source_ref: &str) -> StyleSource {
    if source_ref == DROPPED_KEY {
        return StyleSource::archive(protocol::scheme_url(DROPPED_KEY));
    }
    if is_archive_url(source_ref) {
        return StyleSource::archive(protocol::scheme_url(source_ref));
    }
    StyleSource::template(source_ref)
}

/// Whether a reference names a tile archive rather than a tile endpoint.
pub fn is_archive_url(reference: &str) -> bool {
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    path.ends_with(".pmtiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> StyleComposer {
        StyleComposer::new("https://assets.example.org")
    }

    #[test]
    fn missing_theme_and_source_compose_empty() {
        let doc = composer().compose(ComposeRequest {
            theme: None,
            language: "en",
            source_ref: None,
            sprite_mode: SpriteMode::Remote,
            override_layers: None,
        });
        assert!(doc.sources.is_empty());
        assert!(doc.layers.is_empty());
        assert!(!doc.is_renderable());
    }

    #[test]
    fn archive_url_is_protocol_qualified() {
        let doc = composer().compose(ComposeRequest {
            theme: Theme::named("light"),
            language: "en",
            source_ref: Some("https://tiles.example.org/static/basemap.pmtiles"),
            sprite_mode: SpriteMode::Remote,
            override_layers: None,
        });
        let source = &doc.sources[SOURCE_ID];
        assert_eq!(
            source.url.as_deref(),
            Some("vectorview://https://tiles.example.org/static/basemap.pmtiles")
        );
        assert!(source.tiles.is_empty());
    }

    #[test]
    fn dropped_sentinel_uses_registry_key() {
        let doc = composer().compose(ComposeRequest {
            theme: Theme::named("dark"),
            language: "en",
            source_ref: Some(DROPPED_KEY),
            sprite_mode: SpriteMode::Local,
            override_layers: None,
        });
        assert_eq!(
            doc.sources[SOURCE_ID].url.as_deref(),
            Some("vectorview://dropped")
        );
    }

    #[test]
    fn endpoint_template_is_used_verbatim() {
        let template = "http://127.0.0.1:3000/mvt/provinces/{z}/{x}/{y}.mvt";
        let doc = composer().compose(ComposeRequest {
            theme: Theme::named("light"),
            language: "en",
            source_ref: Some(template),
            sprite_mode: SpriteMode::Remote,
            override_layers: None,
        });
        let source = &doc.sources[SOURCE_ID];
        assert!(source.url.is_none());
        assert_eq!(source.tiles, vec![template.to_string()]);
    }

    #[test]
    fn override_layers_replace_generated_stack_verbatim() {
        let overrides = vec![
            StyleLayer::new("custom-b", "fill"),
            StyleLayer::new("custom-a", "line"),
        ];
        let doc = composer().compose(ComposeRequest {
            theme: Theme::named("light"),
            language: "en",
            source_ref: Some("x.pmtiles"),
            sprite_mode: SpriteMode::Remote,
            override_layers: Some(overrides.clone()),
        });
        assert_eq!(doc.layers, overrides);
    }

    #[test]
    fn sprite_mode_switches_asset_origin() {
        let local = composer().compose(ComposeRequest {
            theme: Theme::named("light"),
            language: "en",
            source_ref: Some("x.pmtiles"),
            sprite_mode: SpriteMode::Local,
            override_layers: None,
        });
        assert_eq!(local.sprite.as_deref(), Some("sprites/light"));
        assert_eq!(local.glyphs.as_deref(), Some("fonts/{fontstack}/{range}.pbf"));

        let remote = composer().compose(ComposeRequest {
            theme: Theme::named("light"),
            language: "en",
            source_ref: Some("x.pmtiles"),
            sprite_mode: SpriteMode::Remote,
            override_layers: None,
        });
        assert_eq!(
            remote.sprite.as_deref(),
            Some("https://assets.example.org/sprites/v3/light")
        );
    }

    #[test]
    fn archive_detection_ignores_query_strings() {
        assert!(is_archive_url("https://h/x.pmtiles?token=abc"));
        assert!(!is_archive_url("https://h/mvt/{z}/{x}/{y}.mvt"));
    }
}
