//! Feature identity decoding.
//!
//! Tile features carry a single unsigned 64-bit id that packs the source
//! object's identity. The layout is a stable wire contract between the
//! tiling pipeline and every consumer:
//!
//! ```text
//! bits  0..44   local object id (44 bits)
//! bits 44..46   kind tag: 0 = not a tagged feature, 1 = node,
//!               2 = way, 3 = relation
//! bits 46..64   unused, required zero
//! ```

/// Width of the local id field.
pub const LOCAL_ID_BITS: u32 = 44;

const LOCAL_ID_MASK: u64 = (1 << LOCAL_ID_BITS) - 1;
const KIND_SHIFT: u32 = LOCAL_ID_BITS;
const KIND_MASK: u64 = 0b11;

/// Kind of source object a tagged feature refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Node,
    Way,
    Relation,
}

impl FeatureKind {
    fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            1 => Some(FeatureKind::Node),
            2 => Some(FeatureKind::Way),
            3 => Some(FeatureKind::Relation),
            _ => None,
        }
    }

    fn tag(self) -> u64 {
        match self {
            FeatureKind::Node => 1,
            FeatureKind::Way => 2,
            FeatureKind::Relation => 3,
        }
    }
}

/// A decoded feature reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureRef {
    /// Source object kind
    pub kind: FeatureKind,
    /// Local object id (44 bits)
    pub id: u64,
}

/// Decode a packed feature id.
///
/// Returns `None` for untagged features (kind tag 0), i.e. synthetic
/// geometry the pipeline generated without a source object.
pub fn decode_feature_id(raw: u64) -> Option<FeatureRef> {
    let kind = FeatureKind::from_tag((raw >> KIND_SHIFT) & KIND_MASK)?;
    Some(FeatureRef {
        kind,
        id: raw & LOCAL_ID_MASK,
    })
}

/// Pack a feature reference, the inverse of [`decode_feature_id`].
///
/// Returns `None` when the local id does not fit the 44-bit field.
pub fn encode_feature_id(feature: FeatureRef) -> Option<u64> {
    if feature.id > LOCAL_ID_MASK {
        return None;
    }
    Some(feature.id | (feature.kind.tag() << KIND_SHIFT))
}
