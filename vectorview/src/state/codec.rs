//! URL-fragment codec for the view state.
//!
//! The fragment is a shareable, human-editable encoding of the view:
//! `key=value&key=value`, case-sensitive keys, values percent-encoded.
//! Encoding merges into whatever pairs already exist so keys owned by other
//! concerns survive, and omits fields equal to their defaults so stale
//! defaults never accumulate. Decoding ignores unknown keys and falls back
//! to defaults on malformed values.

use super::types::{TileSourceRef, ViewState};
use crate::archive::DROPPED_KEY;
use url::form_urlencoded;

const KEY_THEME: &str = "theme";
const KEY_LANGUAGE: &str = "lang";
const KEY_SOURCE: &str = "source";
const KEY_LOCAL_SPRITES: &str = "local_sprites";
const KEY_DEBUG: &str = "debug";
const KEY_STYLE: &str = "style";

/// Keys this codec owns, in canonical write order.
const OWNED_KEYS: &[&str] = &[
    KEY_THEME,
    KEY_LANGUAGE,
    KEY_SOURCE,
    KEY_LOCAL_SPRITES,
    KEY_DEBUG,
    KEY_STYLE,
];

/// Decode a fragment into a view state.
///
/// Unknown keys are ignored (a fragment written by a newer codec still
/// decodes); malformed or empty values fall back to the field's default.
pub fn decode(fragment: &str) -> ViewState {
    let mut state = ViewState::default();
    for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            KEY_THEME if !value.is_empty() => state.theme = value.into_owned(),
            KEY_LANGUAGE if !value.is_empty() => state.language = value.into_owned(),
            KEY_SOURCE => {
                state.source = match value.as_ref() {
                    "" => TileSourceRef::Default,
                    DROPPED_KEY => TileSourceRef::Dropped,
                    url => TileSourceRef::Url(url.to_string()),
                };
            }
            KEY_LOCAL_SPRITES => state.local_sprites = parse_flag(&value),
            KEY_DEBUG => state.debug_overlays = parse_flag(&value),
            // An explicitly empty style pin is distinct from an absent key.
            KEY_STYLE => state.style_version = Some(value.into_owned()),
            _ => {}
        }
    }
    state
}

/// Encode a view state into `existing_fragment`, preserving foreign keys.
///
/// Fields equal to their defaults are omitted entirely: absent means the
/// key is not written, not written as an empty string. Re-encoding a decoded
/// fragment is idempotent.
pub fn encode(existing_fragment: &str, state: &ViewState) -> String {
    let defaults = ViewState::default();

    // Foreign pairs survive in their original order; owned keys are
    // re-emitted from the state below.
    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(existing_fragment.as_bytes())
        .filter(|(key, _)| !OWNED_KEYS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if state.theme != defaults.theme {
        pairs.push((KEY_THEME.to_string(), state.theme.clone()));
    }
    if state.language != defaults.language {
        pairs.push((KEY_LANGUAGE.to_string(), state.language.clone()));
    }
    match &state.source {
        TileSourceRef::Default => {}
        TileSourceRef::Url(url) => pairs.push((KEY_SOURCE.to_string(), url.clone())),
        TileSourceRef::Dropped => {
            pairs.push((KEY_SOURCE.to_string(), DROPPED_KEY.to_string()))
        }
    }
    if state.local_sprites {
        pairs.push((KEY_LOCAL_SPRITES.to_string(), "1".to_string()));
    }
    if state.debug_overlays {
        pairs.push((KEY_DEBUG.to_string(), "1".to_string()));
    }
    if let Some(version) = &state.style_version {
        pairs.push((KEY_STYLE.to_string(), version.clone()));
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Boolean flag values; anything unrecognized is the default `false`.
fn parse_flag(value: &str) -> bool {
    matches!(value, "1" | "true")
}
