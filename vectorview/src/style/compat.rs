//! Style/tileset version compatibility.
//!
//! A style generation is written against a tileset schema generation. The
//! table below records which style majors understand which tileset majors;
//! it is consulted whenever the resolved archive's metadata or the selected
//! style version changes.

/// Major version of the generated layer stack in this build.
pub const STYLE_MAJOR: u64 = 3;

/// Where the full compatibility matrix is documented.
pub const COMPATIBILITY_REFERENCE: &str =
    "https://github.com/vectorview/vectorview/blob/main/docs/compatibility.md";

/// Tileset major version → style majors that can render it.
///
/// A tileset major absent from this table is assumed forward-compatible:
/// newer tilesets are not flagged just for being unknown.
const COMPATIBILITY: &[(u64, &[u64])] = &[(2, &[2, 3]), (3, &[3])];

/// Outcome of a compatibility check. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityResult {
    /// Whether the pairing is usable
    pub compatible: bool,
    /// Advisory message for the incompatible case
    pub message: Option<String>,
}

impl CompatibilityResult {
    fn compatible() -> Self {
        Self {
            compatible: true,
            message: None,
        }
    }
}

/// Check a style major against a tileset's declared version string.
///
/// The tileset major is the integer before the first separator of the
/// version string. Unknown or unparseable tileset majors are treated as
/// compatible with no message; a known major whose compatible set excludes
/// `style_major` produces a non-fatal advisory naming both versions.
pub fn check(style_major: u64, tileset_version: &str) -> CompatibilityResult {
    let Some(tileset_major) = version_major(tileset_version) else {
        return CompatibilityResult::compatible();
    };

    let Some((_, styles)) = COMPATIBILITY.iter().find(|(t, _)| *t == tileset_major) else {
        return CompatibilityResult::compatible();
    };

    if styles.contains(&style_major) {
        return CompatibilityResult::compatible();
    }

    CompatibilityResult {
        compatible: false,
        message: Some(format!(
            "Style v{} does not support tileset v{} ('{}'); see {}",
            style_major, tileset_major, tileset_version, COMPATIBILITY_REFERENCE
        )),
    }
}

/// The major version of a version string: the integer before the first
/// separator, if the string starts with digits.
pub fn version_major(s: &str) -> Option<u64> {
    let digits: &str = s.split(|c: char| !c.is_ascii_digit()).next()?;
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}
