//! Element widths, element type tags and register grouping factors.
//!
//! These are the axes of the builtin namespace. Every builtin name spells out
//! one element type tag and one grouping factor; the canonical operation name
//! keeps the width but drops the signedness (see [`ElementType::canonical_tag`]).

/// Scalar width of the canonical backend calling convention, in bits.
///
/// Broadcast scalars narrower than this are sign-extended before invocation.
pub const CANONICAL_SCALAR_BITS: u32 = 32;

/// Bit-width of one vector lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sew {
    E8,
    E16,
    E32,
}

impl Sew {
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::E8 => 8,
            Self::E16 => 16,
            Self::E32 => 32,
        }
    }

    /// Whether a broadcast scalar of this width must be sign-extended to the
    /// canonical scalar width.
    #[must_use]
    pub const fn needs_scalar_widening(self) -> bool {
        self.bits() < CANONICAL_SCALAR_BITS
    }
}

/// Register grouping factor: how many physical vector registers one logical
/// vector value spans. A naming/selection axis only; it never changes how
/// operands are reshaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lmul {
    M1,
    M2,
    M4,
    M8,
}

impl Lmul {
    pub const ALL: [Self; 4] = [Self::M1, Self::M2, Self::M4, Self::M8];

    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::M1 => "m1",
            Self::M2 => "m2",
            Self::M4 => "m4",
            Self::M8 => "m8",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "m1" => Some(Self::M1),
            "m2" => Some(Self::M2),
            "m4" => Some(Self::M4),
            "m8" => Some(Self::M8),
            _ => None,
        }
    }
}

/// Element type tag as spelled in builtin names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    I8,
    I16,
    I32,
    U8,
    U16,
    U32,
    F32,
}

impl ElementType {
    #[must_use]
    pub const fn sew(self) -> Sew {
        match self {
            Self::I8 | Self::U8 => Sew::E8,
            Self::I16 | Self::U16 => Sew::E16,
            Self::I32 | Self::U32 | Self::F32 => Sew::E32,
        }
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32)
    }

    #[must_use]
    pub const fn is_signed_int(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32)
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F32 => "f32",
        }
    }

    /// The tag with the signedness component collapsed: `i`/`u` become `e`,
    /// float tags are already signless and stay as-is. This is the type tag
    /// spelled by canonical operation names.
    #[must_use]
    pub const fn canonical_tag(self) -> &'static str {
        match self {
            Self::I8 | Self::U8 => "e8",
            Self::I16 | Self::U16 => "e16",
            Self::I32 | Self::U32 => "e32",
            Self::F32 => "f32",
        }
    }

    /// The tag of the opposite signedness, if the type has one.
    #[must_use]
    pub const fn sign_flipped(self) -> Option<Self> {
        match self {
            Self::I8 => Some(Self::U8),
            Self::I16 => Some(Self::U16),
            Self::I32 => Some(Self::U32),
            Self::U8 => Some(Self::I8),
            Self::U16 => Some(Self::I16),
            Self::U32 => Some(Self::I32),
            Self::F32 => None,
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "u8" => Some(Self::U8),
            "u16" => Some(Self::U16),
            "u32" => Some(Self::U32),
            "f32" => Some(Self::F32),
            _ => None,
        }
    }
}

/// The set of element type tags a base operation admits.
///
/// Signedness-insensitive operations admit both integer sign tags and alias
/// onto one canonical operation; signedness-sensitive operations come in
/// `u`-suffixed base-name pairs, each restricted to one sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSet {
    /// Both integer signs (`i8`..`i32`, `u8`..`u32`).
    IntBoth,
    /// Signed integer tags only.
    IntSigned,
    /// Unsigned integer tags only.
    IntUnsigned,
    /// `f32` only.
    Float,
    /// Every tag, integer and float (memory operations).
    Any,
}

impl TypeSet {
    #[must_use]
    pub const fn members(self) -> &'static [ElementType] {
        use ElementType::{F32, I8, I16, I32, U8, U16, U32};
        match self {
            Self::IntBoth => &[I8, I16, I32, U8, U16, U32],
            Self::IntSigned => &[I8, I16, I32],
            Self::IntUnsigned => &[U8, U16, U32],
            Self::Float => &[F32],
            Self::Any => &[I8, I16, I32, U8, U16, U32, F32],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tag_collapses_signedness() {
        assert_eq!(ElementType::I16.canonical_tag(), "e16");
        assert_eq!(ElementType::U16.canonical_tag(), "e16");
        assert_eq!(ElementType::F32.canonical_tag(), "f32");
    }

    #[test]
    fn narrow_widths_need_widening() {
        assert!(Sew::E8.needs_scalar_widening());
        assert!(Sew::E16.needs_scalar_widening());
        assert!(!Sew::E32.needs_scalar_widening());
    }

    #[test]
    fn tag_parse_roundtrip() {
        for set in [TypeSet::IntBoth, TypeSet::Float] {
            for &ty in set.members() {
                assert_eq!(ElementType::parse(ty.tag()), Some(ty));
            }
        }
    }
}
