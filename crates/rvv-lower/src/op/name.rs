//! The symbolic-name grammar of the builtin namespace.
//!
//! A builtin name is the concatenation `base _ shape _ typetag lmul [_m]`,
//! e.g. `vadd_vx_i8m2_m`. The canonical operation name is the same
//! concatenation with the signedness letter of the type tag collapsed
//! (`i16`/`u16` → `e16`) and the masked suffix preserved. External tooling
//! keys off these names, so both directions must reproduce them exactly.

use std::fmt;

use super::elem::{ElementType, Lmul};
use super::shape::OperandShape;

/// Masked-variant suffix.
pub const MASK_SUFFIX: &str = "_m";

/// A builtin name decomposed into its axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinName {
    pub base: String,
    pub shape: OperandShape,
    pub ty: ElementType,
    pub lmul: Lmul,
    pub masked: bool,
}

impl BuiltinName {
    #[must_use]
    pub fn new(
        base: &str,
        shape: OperandShape,
        ty: ElementType,
        lmul: Lmul,
        masked: bool,
    ) -> Self {
        Self {
            base: base.to_string(),
            shape,
            ty,
            lmul,
            masked,
        }
    }

    /// Re-encode without the signedness component: the canonical operation
    /// name this builtin resolves to.
    #[must_use]
    pub fn canonical(&self) -> String {
        let mask = if self.masked { MASK_SUFFIX } else { "" };
        format!(
            "{}_{}_{}{}{}",
            self.base,
            self.shape.tag(),
            self.ty.canonical_tag(),
            self.lmul.suffix(),
            mask
        )
    }

    /// Decompose a symbolic builtin name. Names outside the grammar (such as
    /// `vsetvl` or builtins of other families) return `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let (body, masked) = match name.strip_suffix(MASK_SUFFIX) {
            Some(body) => (body, true),
            None => (name, false),
        };

        let (head, type_lmul) = body.rsplit_once('_')?;
        let (ty, lmul) = parse_type_lmul(type_lmul)?;

        // Splat tags span two `_`-separated segments; try those before the
        // single-segment tags so `vmv_v_x` parses as base `vmv`, shape `v_x`.
        for splat in [
            OperandShape::SplatV,
            OperandShape::SplatX,
            OperandShape::SplatI,
            OperandShape::SplatF,
        ] {
            if let Some(base) = strip_tag_suffix(head, splat.tag()) {
                return Some(Self::new(base, splat, ty, lmul, masked));
            }
        }

        let (base, tag) = head.rsplit_once('_')?;
        let shape = OperandShape::parse_tag(tag)?;
        if base.is_empty() {
            return None;
        }
        Some(Self::new(base, shape, ty, lmul, masked))
    }
}

impl fmt::Display for BuiltinName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = if self.masked { MASK_SUFFIX } else { "" };
        write!(
            f,
            "{}_{}_{}{}{}",
            self.base,
            self.shape.tag(),
            self.ty.tag(),
            self.lmul.suffix(),
            mask
        )
    }
}

fn parse_type_lmul(s: &str) -> Option<(ElementType, Lmul)> {
    for lmul in Lmul::ALL {
        if let Some(ty_str) = s.strip_suffix(lmul.suffix()) {
            if let Some(ty) = ElementType::parse(ty_str) {
                return Some((ty, lmul));
            }
        }
    }
    None
}

fn strip_tag_suffix<'a>(head: &'a str, tag: &str) -> Option<&'a str> {
    let base = head.strip_suffix(tag)?.strip_suffix('_')?;
    if base.is_empty() { None } else { Some(base) }
}
