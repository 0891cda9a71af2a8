//! Material identifiers and policy-side material selectors.

use std::fmt;

/// Number of concrete variants a material family can hold.
///
/// Matches the 4-bit sub-type field of the legacy encoded form: a family
/// selector denotes variants `0..16` of its family.
pub const VARIANTS_PER_FAMILY: u8 = 16;

/// Legacy encoding pivot: raw policy values above this denote one exact
/// variant; values at or below it denote a whole family.
pub const EXACT_ENCODING_BASE: u32 = 10_000;

/// One concrete material variant in the voxel world.
///
/// A *family* groups up to [`VARIANTS_PER_FAMILY`] variants that differ
/// only by sub-type (orientation, colour, fill level). Policy rules may
/// target a single variant or a whole family via [`MaterialSelector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId {
    /// Family identifier.
    pub family: u16,
    /// Variant within the family, `0..16`.
    pub variant: u8,
}

impl MaterialId {
    /// Construct a material id from family and variant.
    pub const fn new(family: u16, variant: u8) -> Self {
        Self { family, variant }
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.family, self.variant)
    }
}

/// Policy-side denotation of one or more concrete materials.
///
/// Structural policies name materials either as a whole family (all of
/// its variants are interchangeable for the rule) or as one exact
/// variant. The legacy integer encoding is preserved at the policy
/// boundary via [`MaterialSelector::from_encoded`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaterialSelector {
    /// Every variant of the family.
    Family(u16),
    /// One exact variant.
    Exact(MaterialId),
}

impl MaterialSelector {
    /// Decode the legacy integer form.
    ///
    /// Values above [`EXACT_ENCODING_BASE`] carry an exact variant:
    /// `(v - 10_000) >> 4` is the family and the low four bits are the
    /// variant. Anything else selects the whole family.
    pub fn from_encoded(value: u32) -> Self {
        if value > EXACT_ENCODING_BASE {
            let combined = value - EXACT_ENCODING_BASE;
            Self::Exact(MaterialId::new(
                (combined >> 4) as u16,
                (combined & 15) as u8,
            ))
        } else {
            Self::Family(value as u16)
        }
    }

    /// Iterate every concrete variant this selector denotes.
    pub fn variants(&self) -> impl Iterator<Item = MaterialId> + '_ {
        let (family, range) = match *self {
            Self::Family(family) => (family, 0..VARIANTS_PER_FAMILY),
            Self::Exact(id) => (id.family, id.variant..id.variant + 1),
        };
        range.map(move |variant| MaterialId::new(family, variant))
    }

    /// The family this selector belongs to.
    pub fn family(&self) -> u16 {
        match *self {
            Self::Family(family) => family,
            Self::Exact(id) => id.family,
        }
    }
}
