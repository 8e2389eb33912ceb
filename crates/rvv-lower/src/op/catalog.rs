//! The static operation catalog.
//!
//! One row per base operation; the resolution table expands each row over
//! {shape × element type × grouping factor × mask} into the full builtin
//! namespace. Adding an operation means adding a row here, nothing else.

use super::elem::{Sew, TypeSet};
use super::shape::{OpClass, OperandShape};

/// One base operation of the vector namespace.
#[derive(Debug, Clone, Copy)]
pub struct OpSpec {
    pub base: &'static str,
    pub class: OpClass,
    pub types: TypeSet,
    pub shapes: &'static [OperandShape],
    /// Admissible element widths. Widening operations stop at 16 bits
    /// (the destination is twice as wide); conversions are 32-bit only.
    pub sew: &'static [Sew],
    /// Whether `_m` variants exist. Carry forms and whole-register moves
    /// are never maskable.
    pub maskable: bool,
}

const SEW_ALL: &[Sew] = &[Sew::E8, Sew::E16, Sew::E32];
const SEW_NARROW: &[Sew] = &[Sew::E8, Sew::E16];
const SEW_32: &[Sew] = &[Sew::E32];

const VV_VX_VI: &[OperandShape] = &[OperandShape::Vv, OperandShape::Vx, OperandShape::Vi];
const VV_VX: &[OperandShape] = &[OperandShape::Vv, OperandShape::Vx];
const VX_VI: &[OperandShape] = &[OperandShape::Vx, OperandShape::Vi];
const WV_WX_WI: &[OperandShape] = &[OperandShape::Wv, OperandShape::Wx, OperandShape::Wi];
const WV_WX: &[OperandShape] = &[OperandShape::Wv, OperandShape::Wx];
const VS: &[OperandShape] = &[OperandShape::Vs];
const VV_VF: &[OperandShape] = &[OperandShape::Vv, OperandShape::Vf];
const V: &[OperandShape] = &[OperandShape::V];

const fn int_both(
    base: &'static str,
    class: OpClass,
    shapes: &'static [OperandShape],
) -> OpSpec {
    OpSpec {
        base,
        class,
        types: TypeSet::IntBoth,
        shapes,
        sew: SEW_ALL,
        maskable: true,
    }
}

const fn int_signed(
    base: &'static str,
    class: OpClass,
    shapes: &'static [OperandShape],
) -> OpSpec {
    OpSpec {
        base,
        class,
        types: TypeSet::IntSigned,
        shapes,
        sew: SEW_ALL,
        maskable: true,
    }
}

const fn int_unsigned(
    base: &'static str,
    class: OpClass,
    shapes: &'static [OperandShape],
) -> OpSpec {
    OpSpec {
        base,
        class,
        types: TypeSet::IntUnsigned,
        shapes,
        sew: SEW_ALL,
        maskable: true,
    }
}

const fn float(base: &'static str, shapes: &'static [OperandShape]) -> OpSpec {
    OpSpec {
        base,
        class: OpClass::Arith,
        types: TypeSet::Float,
        shapes,
        sew: SEW_32,
        maskable: true,
    }
}

pub static CATALOG: &[OpSpec] = &[
    // ── Integer arithmetic, signedness-insensitive ──
    int_both("vadd", OpClass::Arith, VV_VX_VI),
    int_both("vsub", OpClass::Arith, VV_VX),
    int_both("vrsub", OpClass::Arith, VX_VI),
    int_both("vand", OpClass::Arith, VV_VX_VI),
    int_both("vor", OpClass::Arith, VV_VX_VI),
    int_both("vxor", OpClass::Arith, VV_VX_VI),
    int_both("vsll", OpClass::Arith, VV_VX_VI),
    int_both("vmul", OpClass::Arith, VV_VX),
    // ── Integer arithmetic, signed/unsigned base-name pairs ──
    int_signed("vsra", OpClass::Arith, VV_VX_VI),
    int_unsigned("vsrl", OpClass::Arith, VV_VX_VI),
    int_signed("vmin", OpClass::Arith, VV_VX),
    int_unsigned("vminu", OpClass::Arith, VV_VX),
    int_signed("vmax", OpClass::Arith, VV_VX),
    int_unsigned("vmaxu", OpClass::Arith, VV_VX),
    int_signed("vmulh", OpClass::Arith, VV_VX),
    int_unsigned("vmulhu", OpClass::Arith, VV_VX),
    int_signed("vdiv", OpClass::Arith, VV_VX),
    int_unsigned("vdivu", OpClass::Arith, VV_VX),
    int_signed("vrem", OpClass::Arith, VV_VX),
    int_unsigned("vremu", OpClass::Arith, VV_VX),
    // ── Compares (results are mask vectors) ──
    int_both("vmseq", OpClass::Compare, VV_VX_VI),
    int_both("vmsne", OpClass::Compare, VV_VX_VI),
    int_signed("vmslt", OpClass::Compare, VV_VX),
    int_unsigned("vmsltu", OpClass::Compare, VV_VX),
    int_signed("vmsle", OpClass::Compare, VV_VX_VI),
    int_unsigned("vmsleu", OpClass::Compare, VV_VX_VI),
    int_signed("vmsgt", OpClass::Compare, VX_VI),
    int_unsigned("vmsgtu", OpClass::Compare, VX_VI),
    // ── Widening (sources are 8/16-bit, destinations twice as wide) ──
    OpSpec {
        base: "vwadd",
        class: OpClass::Widening,
        types: TypeSet::IntSigned,
        shapes: WV_WX_WI,
        sew: SEW_NARROW,
        maskable: true,
    },
    OpSpec {
        base: "vwaddu",
        class: OpClass::Widening,
        types: TypeSet::IntUnsigned,
        shapes: WV_WX_WI,
        sew: SEW_NARROW,
        maskable: true,
    },
    OpSpec {
        base: "vwsub",
        class: OpClass::Widening,
        types: TypeSet::IntSigned,
        shapes: WV_WX_WI,
        sew: SEW_NARROW,
        maskable: true,
    },
    OpSpec {
        base: "vwsubu",
        class: OpClass::Widening,
        types: TypeSet::IntUnsigned,
        shapes: WV_WX_WI,
        sew: SEW_NARROW,
        maskable: true,
    },
    OpSpec {
        base: "vwmul",
        class: OpClass::Widening,
        types: TypeSet::IntSigned,
        shapes: WV_WX,
        sew: SEW_NARROW,
        maskable: true,
    },
    OpSpec {
        base: "vwmulu",
        class: OpClass::Widening,
        types: TypeSet::IntUnsigned,
        shapes: WV_WX,
        sew: SEW_NARROW,
        maskable: true,
    },
    // ── Carry/borrow (the trailing mask operand is the carry-in) ──
    OpSpec {
        base: "vadc",
        class: OpClass::Carry,
        types: TypeSet::IntBoth,
        shapes: &[OperandShape::Vvm, OperandShape::Vxm, OperandShape::Vim],
        sew: SEW_ALL,
        maskable: false,
    },
    OpSpec {
        base: "vsbc",
        class: OpClass::Carry,
        types: TypeSet::IntBoth,
        shapes: &[OperandShape::Vvm, OperandShape::Vxm],
        sew: SEW_ALL,
        maskable: false,
    },
    // ── Reductions ──
    int_both("vredsum", OpClass::Reduce, VS),
    int_both("vredand", OpClass::Reduce, VS),
    int_both("vredor", OpClass::Reduce, VS),
    int_both("vredxor", OpClass::Reduce, VS),
    int_signed("vredmax", OpClass::Reduce, VS),
    int_unsigned("vredmaxu", OpClass::Reduce, VS),
    int_signed("vredmin", OpClass::Reduce, VS),
    int_unsigned("vredminu", OpClass::Reduce, VS),
    // ── Permutation ──
    int_both("vrgather", OpClass::Permute, VV_VX_VI),
    int_both("vslideup", OpClass::Permute, VX_VI),
    int_both("vslidedown", OpClass::Permute, VX_VI),
    // ── Moves/splats (whole-register semantics, never masked) ──
    OpSpec {
        base: "vmv",
        class: OpClass::Move,
        types: TypeSet::IntBoth,
        shapes: &[OperandShape::SplatV, OperandShape::SplatX, OperandShape::SplatI],
        sew: SEW_ALL,
        maskable: false,
    },
    OpSpec {
        base: "vfmv",
        class: OpClass::Move,
        types: TypeSet::Float,
        shapes: &[OperandShape::SplatF],
        sew: SEW_32,
        maskable: false,
    },
    // ── Float arithmetic ──
    float("vfadd", VV_VF),
    float("vfsub", VV_VF),
    float("vfmul", VV_VF),
    float("vfdiv", VV_VF),
    float("vfmin", VV_VF),
    float("vfmax", VV_VF),
    // ── Conversions (32-bit lanes only) ──
    OpSpec {
        base: "vfcvt_x_f",
        class: OpClass::Convert,
        types: TypeSet::Float,
        shapes: V,
        sew: SEW_32,
        maskable: true,
    },
    OpSpec {
        base: "vfcvt_f_x",
        class: OpClass::Convert,
        types: TypeSet::IntSigned,
        shapes: V,
        sew: SEW_32,
        maskable: true,
    },
    OpSpec {
        base: "vfcvt_f_xu",
        class: OpClass::Convert,
        types: TypeSet::IntUnsigned,
        shapes: V,
        sew: SEW_32,
        maskable: true,
    },
    // ── Memory ──
    OpSpec {
        base: "vle",
        class: OpClass::Load,
        types: TypeSet::Any,
        shapes: V,
        sew: SEW_ALL,
        maskable: true,
    },
    OpSpec {
        base: "vse",
        class: OpClass::Store,
        types: TypeSet::Any,
        shapes: V,
        sew: SEW_ALL,
        maskable: true,
    },
];
