//! Operand shapes, behavioral op classes and builtin signatures.

/// Structural class of a builtin's operands. The shape tag is the second
/// component of the builtin name and decides the argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandShape {
    /// Vector-vector.
    Vv,
    /// Vector-scalar broadcast.
    Vx,
    /// Vector-immediate.
    Vi,
    /// Float vector-scalar broadcast.
    Vf,
    /// Widening vector-vector (destination elements are twice as wide).
    Wv,
    /// Widening vector-scalar.
    Wx,
    /// Widening vector-immediate.
    Wi,
    /// Carry/borrow vector-vector; the trailing mask is the carry-in.
    Vvm,
    /// Carry/borrow vector-scalar.
    Vxm,
    /// Carry/borrow vector-immediate.
    Vim,
    /// Reduction: source vector plus accumulator vector.
    Vs,
    /// Whole-vector move (`v_v`).
    SplatV,
    /// Scalar splat (`v_x`).
    SplatX,
    /// Immediate splat (`v_i`).
    SplatI,
    /// Float scalar splat (`v_f`).
    SplatF,
    /// Single-source forms: loads, stores, conversions (`v`).
    V,
}

impl OperandShape {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Vv => "vv",
            Self::Vx => "vx",
            Self::Vi => "vi",
            Self::Vf => "vf",
            Self::Wv => "wv",
            Self::Wx => "wx",
            Self::Wi => "wi",
            Self::Vvm => "vvm",
            Self::Vxm => "vxm",
            Self::Vim => "vim",
            Self::Vs => "vs",
            Self::SplatV => "v_v",
            Self::SplatX => "v_x",
            Self::SplatI => "v_i",
            Self::SplatF => "v_f",
            Self::V => "v",
        }
    }

    #[must_use]
    pub fn parse_tag(s: &str) -> Option<Self> {
        match s {
            "vv" => Some(Self::Vv),
            "vx" => Some(Self::Vx),
            "vi" => Some(Self::Vi),
            "vf" => Some(Self::Vf),
            "wv" => Some(Self::Wv),
            "wx" => Some(Self::Wx),
            "wi" => Some(Self::Wi),
            "vvm" => Some(Self::Vvm),
            "vxm" => Some(Self::Vxm),
            "vim" => Some(Self::Vim),
            "vs" => Some(Self::Vs),
            "v_v" => Some(Self::SplatV),
            "v_x" => Some(Self::SplatX),
            "v_i" => Some(Self::SplatI),
            "v_f" => Some(Self::SplatF),
            "v" => Some(Self::V),
            _ => None,
        }
    }

    /// Shapes whose second operand is a compile-time immediate.
    #[must_use]
    pub const fn is_immediate(self) -> bool {
        matches!(self, Self::Vi | Self::Wi | Self::Vim | Self::SplatI)
    }

    /// Shapes that carry an inherent trailing mask operand (carry/borrow
    /// forms). These are not maskable a second time.
    #[must_use]
    pub const fn has_carry_operand(self) -> bool {
        matches!(self, Self::Vvm | Self::Vxm | Self::Vim)
    }
}

/// Behavioral class of a base operation. Shapes shared between classes (the
/// single-source `v` tag in particular) resolve their signatures through this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpClass {
    Arith,
    Compare,
    Carry,
    Widening,
    Reduce,
    Permute,
    Move,
    Convert,
    Load,
    Store,
    Csr,
}

/// Kind of one declared builtin parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Vector register operand.
    Vector,
    /// Element-typed broadcast scalar.
    Scalar,
    /// Compile-time integer constant.
    Imm,
    /// Predicate mask vector.
    Mask,
    /// Memory address.
    Ptr,
}

impl ParamKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Scalar => "scalar",
            Self::Imm => "imm",
            Self::Mask => "mask",
            Self::Ptr => "ptr",
        }
    }
}

/// Declared signature of one builtin: the ordered parameter kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ParamKind>,
}

impl Signature {
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Parameter list of an unmasked builtin, derived from its class and shape.
///
/// A masked builtin prepends one `Mask` parameter to this list, which is what
/// shifts every transform index by exactly one.
#[must_use]
pub const fn unmasked_params(class: OpClass, shape: OperandShape) -> &'static [ParamKind] {
    use ParamKind::{Imm, Mask, Ptr, Scalar, Vector};
    match (class, shape) {
        (OpClass::Load, OperandShape::V) => &[Ptr],
        (OpClass::Store, OperandShape::V) => &[Ptr, Vector],
        (OpClass::Convert, OperandShape::V) => &[Vector],
        (_, OperandShape::Vv | OperandShape::Wv | OperandShape::Vs) => &[Vector, Vector],
        (_, OperandShape::Vx | OperandShape::Wx | OperandShape::Vf) => &[Vector, Scalar],
        (_, OperandShape::Vi | OperandShape::Wi) => &[Vector, Imm],
        (_, OperandShape::Vvm) => &[Vector, Vector, Mask],
        (_, OperandShape::Vxm) => &[Vector, Scalar, Mask],
        (_, OperandShape::Vim) => &[Vector, Imm, Mask],
        (_, OperandShape::SplatV) => &[Vector],
        (_, OperandShape::SplatX | OperandShape::SplatF) => &[Scalar],
        (_, OperandShape::SplatI) => &[Imm],
        // The single-source tag only occurs on loads, stores and converts.
        (_, OperandShape::V) => &[Vector],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_parse_roundtrip() {
        for shape in [
            OperandShape::Vv,
            OperandShape::Vx,
            OperandShape::Vi,
            OperandShape::Vf,
            OperandShape::Wv,
            OperandShape::Wx,
            OperandShape::Wi,
            OperandShape::Vvm,
            OperandShape::Vxm,
            OperandShape::Vim,
            OperandShape::Vs,
            OperandShape::SplatV,
            OperandShape::SplatX,
            OperandShape::SplatI,
            OperandShape::SplatF,
            OperandShape::V,
        ] {
            assert_eq!(OperandShape::parse_tag(shape.tag()), Some(shape));
        }
    }

    #[test]
    fn carry_shapes_end_in_mask() {
        for shape in [OperandShape::Vvm, OperandShape::Vxm, OperandShape::Vim] {
            let params = unmasked_params(OpClass::Carry, shape);
            assert_eq!(params.last(), Some(&ParamKind::Mask));
        }
    }

    #[test]
    fn store_takes_address_and_value() {
        let params = unmasked_params(OpClass::Store, OperandShape::V);
        assert_eq!(params, &[ParamKind::Ptr, ParamKind::Vector]);
    }
}
