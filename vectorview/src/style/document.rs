//! Serde model of the style document consumed by the rendering engine.
//!
//! Only the fields this viewer produces are modeled. Layer order is
//! significant: layers draw bottom-to-top, later entries over earlier ones.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Style document spec version the rendering engine expects.
pub const STYLE_SPEC_VERSION: u8 = 8;

/// A complete renderable style: sources plus ordered draw layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style spec version, always [`STYLE_SPEC_VERSION`]
    pub version: u8,
    /// Display name
    pub name: String,
    /// Named data sources
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sources: BTreeMap<String, StyleSource>,
    /// Draw layers, bottom-to-top
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
    /// Sprite sheet URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// Glyph URL template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
}

impl StyleDocument {
    /// A document with no sources and no layers.
    ///
    /// Rendering a blank map is the defined behavior for incomplete
    /// configuration; an empty document is not an error.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            version: STYLE_SPEC_VERSION,
            name: name.into(),
            sources: BTreeMap::new(),
            layers: Vec::new(),
            sprite: None,
            glyphs: None,
        }
    }

    /// Whether the document has anything to draw.
    pub fn is_renderable(&self) -> bool {
        !self.sources.is_empty() && !self.layers.is_empty()
    }
}

/// A vector tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSource {
    /// Source type, `"vector"` for everything this viewer produces
    #[serde(rename = "type")]
    pub kind: String,
    /// Archive reference (protocol-qualified), mutually exclusive with `tiles`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tile endpoint templates with `{z}/{x}/{y}` placeholders
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiles: Vec<String>,
    /// Attribution text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl StyleSource {
    /// Vector source backed by an archive reference.
    pub fn archive(url: impl Into<String>) -> Self {
        Self {
            kind: "vector".to_string(),
            url: Some(url.into()),
            tiles: Vec::new(),
            attribution: None,
        }
    }

    /// Vector source backed by a tile endpoint template.
    pub fn template(template: impl Into<String>) -> Self {
        Self {
            kind: "vector".to_string(),
            url: None,
            tiles: vec![template.into()],
            attribution: None,
        }
    }
}

/// One draw layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleLayer {
    /// Unique layer id
    pub id: String,
    /// Layer type (`background`, `fill`, `line`, `symbol`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Source this layer draws from (absent for `background`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Named layer inside the vector source
    #[serde(rename = "source-layer", default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    /// Minimum zoom this layer is drawn at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<u8>,
    /// Maximum zoom this layer is drawn at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<u8>,
    /// Feature filter expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Layout properties
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub layout: Map<String, Value>,
    /// Paint properties
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
}

impl StyleLayer {
    /// A layer with the given id and type, everything else empty.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            source: None,
            source_layer: None,
            minzoom: None,
            maxzoom: None,
            filter: None,
            layout: Map::new(),
            paint: Map::new(),
        }
    }
}

/// Extract the object map from a JSON value, empty for anything else.
pub(crate) fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_document_serializes_without_optional_keys() {
        let doc = StyleDocument::empty("blank");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["version"], 8);
        assert!(json.get("sources").is_none());
        assert!(json.get("sprite").is_none());
        assert!(!doc.is_renderable());
    }

    #[test]
    fn archive_source_has_url_not_tiles() {
        let source = StyleSource::archive("vectorview://dropped");
        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["type"], "vector");
        assert_eq!(json["url"], "vectorview://dropped");
        assert!(json.get("tiles").is_none());
    }

    #[test]
    fn layer_round_trips_through_json() {
        let mut layer = StyleLayer::new("water", "fill");
        layer.source = Some("basemap".to_string());
        layer.source_layer = Some("water".to_string());
        layer.paint = object(json!({"fill-color": "#a0c8f0"}));

        let text = serde_json::to_string(&layer).unwrap();
        let back: StyleLayer = serde_json::from_str(&text).unwrap();
        assert_eq!(layer, back);
        assert!(text.contains("source-layer"));
    }

    #[test]
    fn document_preserves_layer_order() {
        let mut doc = StyleDocument::empty("ordered");
        for id in ["a", "b", "c"] {
            doc.layers.push(StyleLayer::new(id, "fill"));
        }
        let text = serde_json::to_string(&doc).unwrap();
        let back: StyleDocument = serde_json::from_str(&text).unwrap();
        let ids: Vec<_> = back.layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
