//! Named visual themes.
//!
//! A theme is a parameterizable set of layer-styling rules independent of
//! the data source. Every theme emits the same canonical layer stack in the
//! same draw order; only colors and weights differ. Label layers are
//! parameterized by language at composition time.

use super::document::{object, StyleLayer};
use serde_json::json;

/// Colors a theme assigns to the canonical layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub land: &'static str,
    pub land_use: &'static str,
    pub water: &'static str,
    pub road: &'static str,
    pub building: &'static str,
    pub boundary: &'static str,
    pub label: &'static str,
    pub label_halo: &'static str,
}

/// A named theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    name: &'static str,
    palette: ThemePalette,
}

/// Built-in themes.
///
/// `light` is the default; `dark` for night use; `contrast` maximizes
/// figure/ground separation for print and accessibility.
static THEMES: &[Theme] = &[
    Theme {
        name: "light",
        palette: ThemePalette {
            background: "#f8f4f0",
            land: "#e8e4dc",
            land_use: "#dcead2",
            water: "#a0c8f0",
            road: "#ffffff",
            building: "#d9d0c9",
            boundary: "#9e9cab",
            label: "#333333",
            label_halo: "#ffffff",
        },
    },
    Theme {
        name: "dark",
        palette: ThemePalette {
            background: "#1a1a1f",
            land: "#24242b",
            land_use: "#223026",
            water: "#10304d",
            road: "#3d3d46",
            building: "#2e2e36",
            boundary: "#5c5a6b",
            label: "#c8c8d0",
            label_halo: "#1a1a1f",
        },
    },
    Theme {
        name: "contrast",
        palette: ThemePalette {
            background: "#ffffff",
            land: "#f2f2f2",
            land_use: "#e0eed8",
            water: "#0050a0",
            road: "#000000",
            building: "#b0b0b0",
            boundary: "#404040",
            label: "#000000",
            label_halo: "#ffffff",
        },
    },
];

/// Theme name used when the fragment names none.
pub const DEFAULT_THEME: &str = "light";

impl Theme {
    /// Look up a theme by name.
    pub fn named(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|t| t.name == name)
    }

    /// All built-in themes.
    pub fn all() -> &'static [Theme] {
        THEMES
    }

    /// This theme's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// This theme's palette.
    pub fn palette(&self) -> &ThemePalette {
        &self.palette
    }

    /// Generate the canonical layer stack bound to `source_id`.
    ///
    /// Draw order is bottom-to-top and identical for every theme:
    /// background and fills, then lines, then labels. Later layers draw over
    /// earlier ones, so reordering here changes what the user sees.
    pub fn layers(&self, language: &str, source_id: &str) -> Vec<StyleLayer> {
        let p = &self.palette;
        let mut layers = Vec::with_capacity(8);

        let mut background = StyleLayer::new("background", "background");
        background.paint = object(json!({ "background-color": p.background }));
        layers.push(background);

        layers.push(fill(source_id, "land", "land_cover", p.land, None));
        layers.push(fill(source_id, "landuse", "land_use", p.land_use, Some(8)));
        layers.push(fill(source_id, "water", "water", p.water, None));

        let mut roads = StyleLayer::new("roads", "line");
        roads.source = Some(source_id.to_string());
        roads.source_layer = Some("roads".to_string());
        roads.layout = object(json!({ "line-cap": "round", "line-join": "round" }));
        roads.paint = object(json!({
            "line-color": p.road,
            "line-width": ["interpolate", ["linear"], ["zoom"], 6, 0.5, 14, 2.5],
        }));
        layers.push(roads);

        layers.push(fill(source_id, "buildings", "buildings", p.building, Some(13)));

        let mut boundaries = StyleLayer::new("boundaries", "line");
        boundaries.source = Some(source_id.to_string());
        boundaries.source_layer = Some("boundaries".to_string());
        boundaries.paint = object(json!({
            "line-color": p.boundary,
            "line-width": 1.0,
            "line-dasharray": [3, 2],
        }));
        layers.push(boundaries);

        let mut labels = StyleLayer::new("place-labels", "symbol");
        labels.source = Some(source_id.to_string());
        labels.source_layer = Some("place_labels".to_string());
        labels.layout = object(json!({
            "text-field": label_expression(language),
            "text-font": ["Noto Sans Regular"],
            "text-size": 12,
        }));
        labels.paint = object(json!({
            "text-color": p.label,
            "text-halo-color": p.label_halo,
            "text-halo-width": 1.2,
        }));
        layers.push(labels);

        layers
    }
}

fn fill(
    source_id: &str,
    id: &str,
    source_layer: &str,
    color: &str,
    minzoom: Option<u8>,
) -> StyleLayer {
    let mut layer = StyleLayer::new(id, "fill");
    layer.source = Some(source_id.to_string());
    layer.source_layer = Some(source_layer.to_string());
    layer.minzoom = minzoom;
    layer.paint = object(json!({ "fill-color": color }));
    layer
}

/// Label text expression: prefer the localized name, fall back to `name`.
fn label_expression(language: &str) -> serde_json::Value {
    json!(["coalesce", ["get", format!("name:{}", language)], ["get", "name"]])
}
