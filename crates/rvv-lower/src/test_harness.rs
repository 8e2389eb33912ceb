//! Reference executor for canonical vector operations.
//!
//! `VectorMachine` is a [`Backend`] that actually computes: vectors are lane
//! arrays with wraparound arithmetic at the operation's element width, plus a
//! small flat byte memory for the load/store operations. It exists so tests
//! can drive the whole pipeline end to end and observe results, not to model
//! the ISA; masked-off lanes read as zero and the grouping factor is ignored
//! (it never affects operand handling).
//!
//! Only available when running tests or with the `test-harness` feature.

// Lane values are stored width-truncated in u64; the element/bit
// reinterpretations below are all intentional.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::match_same_arms,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

use crate::lower::{Backend, Operand, sign_extend};
use crate::op::{CanonicalForm, CanonicalOp, OpClass, OperandShape, Sew};
use crate::{Error, Result};

/// Flat memory size of the machine, in bytes.
pub const MEMORY_SIZE: usize = 64 * 1024;

const DEFAULT_VL: usize = 8;

/// A value produced by the reference executor.
///
/// Float scalars travel bit-cast in the low 32 bits of `Scalar`.
#[derive(Debug, Clone, PartialEq)]
pub enum SimValue {
    /// Lane array, each lane truncated to the producing operation's width.
    Vector(Vec<u64>),
    Scalar(i64),
    Mask(Vec<bool>),
    /// Result of a store.
    Unit,
}

impl SimValue {
    pub fn lanes(&self) -> Option<&[u64]> {
        match self {
            Self::Vector(lanes) => Some(lanes),
            _ => None,
        }
    }
}

/// Reference vector machine: executes canonical operations over lane arrays.
pub struct VectorMachine {
    memory: Vec<u8>,
    vl: usize,
}

impl Default for VectorMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorMachine {
    pub fn new() -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE],
            vl: DEFAULT_VL,
        }
    }

    /// Active vector length: the lane count of splats and memory operations.
    pub fn vl(&self) -> usize {
        self.vl
    }

    pub fn set_vl(&mut self, vl: usize) {
        self.vl = vl;
    }

    pub fn write_memory(&mut self, addr: usize, bytes: &[u8]) {
        self.memory[addr..addr + bytes.len()].copy_from_slice(bytes);
    }

    pub fn read_memory(&self, addr: usize, len: usize) -> &[u8] {
        &self.memory[addr..addr + len]
    }

    fn execute(
        &mut self,
        op: &CanonicalOp,
        operands: Vec<Operand<SimValue>>,
    ) -> Result<SimValue> {
        let Some(form) = op.form else {
            return self.exec_vsetvl(&operands);
        };

        let (mask, rest) = if form.masked {
            let mut iter = operands.into_iter();
            let mask = expect_mask(&iter.next().ok_or_else(|| missing(op))?)?;
            (Some(mask), iter.collect::<Vec<_>>())
        } else {
            (None, operands)
        };

        let result = match op.class {
            OpClass::Arith if form.float => exec_float_binary(op, form, &rest)?,
            OpClass::Arith | OpClass::Widening => exec_int_binary(op, form, &rest)?,
            OpClass::Compare => exec_compare(op, form, &rest)?,
            OpClass::Carry => exec_carry(op, form, &rest)?,
            // Masking selects which source lanes participate in the fold,
            // not which result lanes survive.
            OpClass::Reduce => return exec_reduce(op, form, &rest, mask.as_deref()),
            OpClass::Permute => exec_permute(op, form, &rest)?,
            OpClass::Move => self.exec_move(op, form, &rest)?,
            OpClass::Convert => exec_convert(op, &rest)?,
            OpClass::Load => self.exec_load(form, &rest)?,
            OpClass::Store => return self.exec_store(form, &rest, mask.as_deref()),
            OpClass::Csr => {
                return Err(Error::Internal(format!(
                    "csr operation `{}` carries a vector form",
                    op.name
                )));
            }
        };

        Ok(match mask {
            Some(mask) => apply_mask(result, &mask),
            None => result,
        })
    }

    fn exec_vsetvl(&mut self, operands: &[Operand<SimValue>]) -> Result<SimValue> {
        let avl = expect_scalar(&operands[0])?;
        // The vtype mode selector (operands[1]) only matters to real
        // hardware; the executor keeps lane counts explicit.
        self.vl = usize::try_from(avl.max(0)).unwrap_or(0).min(MEMORY_SIZE);
        Ok(SimValue::Scalar(self.vl as i64))
    }

    fn exec_move(
        &mut self,
        op: &CanonicalOp,
        form: CanonicalForm,
        rest: &[Operand<SimValue>],
    ) -> Result<SimValue> {
        match form.shape {
            OperandShape::SplatV => Ok(SimValue::Vector(expect_vector(&rest[0])?.to_vec())),
            OperandShape::SplatX | OperandShape::SplatI | OperandShape::SplatF => {
                let value = expect_scalar(&rest[0])? as u64 & lane_mask(form.sew.bits());
                Ok(SimValue::Vector(vec![value; self.vl]))
            }
            _ => Err(unhandled(op)),
        }
    }

    fn exec_load(&mut self, form: CanonicalForm, rest: &[Operand<SimValue>]) -> Result<SimValue> {
        let addr = usize::try_from(expect_scalar(&rest[0])?)
            .map_err(|_| Error::Internal("negative load address".to_string()))?;
        let step = form.sew.bits() as usize / 8;
        let mut lanes = Vec::with_capacity(self.vl);
        for i in 0..self.vl {
            let bytes = self.read_memory(addr + i * step, step);
            let mut lane = 0u64;
            for (shift, byte) in bytes.iter().enumerate() {
                lane |= u64::from(*byte) << (8 * shift);
            }
            lanes.push(lane);
        }
        Ok(SimValue::Vector(lanes))
    }

    fn exec_store(
        &mut self,
        form: CanonicalForm,
        rest: &[Operand<SimValue>],
        mask: Option<&[bool]>,
    ) -> Result<SimValue> {
        let addr = usize::try_from(expect_scalar(&rest[0])?)
            .map_err(|_| Error::Internal("negative store address".to_string()))?;
        let lanes = expect_vector(&rest[1])?;
        let step = form.sew.bits() as usize / 8;
        for (i, lane) in lanes.iter().enumerate() {
            if mask.is_some_and(|m| !m.get(i).copied().unwrap_or(false)) {
                continue;
            }
            let bytes = lane.to_le_bytes();
            let offset = addr + i * step;
            self.memory[offset..offset + step].copy_from_slice(&bytes[..step]);
        }
        Ok(SimValue::Unit)
    }
}

impl Backend for VectorMachine {
    type Value = SimValue;

    fn widen_scalar(&mut self, value: SimValue, from: Sew) -> Result<SimValue> {
        match value {
            SimValue::Scalar(s) => Ok(SimValue::Scalar(sign_extend(s, from))),
            other => Err(Error::Internal(format!(
                "widen_scalar applied to {other:?}"
            ))),
        }
    }

    fn emit_call(
        &mut self,
        op: &CanonicalOp,
        operands: Vec<Operand<SimValue>>,
    ) -> Result<SimValue> {
        self.execute(op, operands)
    }
}

// ── Operand accessors ──

fn expect_vector(operand: &Operand<SimValue>) -> Result<&[u64]> {
    match operand {
        Operand::Value(SimValue::Vector(lanes)) => Ok(lanes),
        other => Err(Error::Internal(format!("expected vector, got {other:?}"))),
    }
}

fn expect_scalar(operand: &Operand<SimValue>) -> Result<i64> {
    match operand {
        Operand::Const(value) => Ok(*value),
        Operand::Value(SimValue::Scalar(value)) => Ok(*value),
        other => Err(Error::Internal(format!("expected scalar, got {other:?}"))),
    }
}

fn expect_mask(operand: &Operand<SimValue>) -> Result<Vec<bool>> {
    match operand {
        Operand::Value(SimValue::Mask(bits)) => Ok(bits.clone()),
        other => Err(Error::Internal(format!("expected mask, got {other:?}"))),
    }
}

/// Second source by shape: vector forms read lanes, scalar and immediate
/// forms splat.
fn rhs_lanes(
    shape: OperandShape,
    operand: &Operand<SimValue>,
    count: usize,
) -> Result<Vec<u64>> {
    match shape {
        OperandShape::Vv | OperandShape::Wv | OperandShape::Vvm | OperandShape::Vs => {
            Ok(expect_vector(operand)?.to_vec())
        }
        _ => {
            let scalar = expect_scalar(operand)? as u64;
            Ok(vec![scalar; count])
        }
    }
}

// ── Lane arithmetic ──

fn lane_mask(bits: u32) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

fn sext_lane(lane: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((lane << shift) as i64) >> shift
}

fn exec_int_binary(
    op: &CanonicalOp,
    form: CanonicalForm,
    rest: &[Operand<SimValue>],
) -> Result<SimValue> {
    let a = expect_vector(&rest[0])?;
    let b = rhs_lanes(form.shape, &rest[1], a.len())?;
    if a.len() != b.len() {
        return Err(Error::Internal(format!(
            "lane count mismatch in `{}`: {} vs {}",
            op.name,
            a.len(),
            b.len()
        )));
    }

    let bits = form.sew.bits();
    let out_bits = if op.class == OpClass::Widening {
        bits * 2
    } else {
        bits
    };
    let mask = lane_mask(bits);
    let out_mask = lane_mask(out_bits);
    let shift_mask = u64::from(bits - 1);

    let mut lanes = Vec::with_capacity(a.len());
    for (&ra, &rb) in a.iter().zip(&b) {
        let (ua, ub) = (ra & mask, rb & mask);
        let (sa, sb) = (sext_lane(ra, bits), sext_lane(rb, bits));
        let lane = match op.base {
            "vadd" => ua.wrapping_add(ub),
            "vsub" => ua.wrapping_sub(ub),
            "vrsub" => ub.wrapping_sub(ua),
            "vand" => ua & ub,
            "vor" => ua | ub,
            "vxor" => ua ^ ub,
            "vsll" => ua << (ub & shift_mask),
            "vsrl" => ua >> (ub & shift_mask),
            "vsra" => (sa >> (ub & shift_mask)) as u64,
            "vmin" => sa.min(sb) as u64,
            "vmax" => sa.max(sb) as u64,
            "vminu" => ua.min(ub),
            "vmaxu" => ua.max(ub),
            "vmul" => ua.wrapping_mul(ub),
            "vmulh" => (sa.wrapping_mul(sb) >> bits) as u64,
            "vmulhu" => ua.wrapping_mul(ub) >> bits,
            "vdiv" => {
                if ub == 0 {
                    mask
                } else {
                    sa.wrapping_div(sb) as u64
                }
            }
            "vdivu" => {
                if ub == 0 {
                    mask
                } else {
                    ua / ub
                }
            }
            "vrem" => {
                if ub == 0 {
                    ua
                } else {
                    sa.wrapping_rem(sb) as u64
                }
            }
            "vremu" => {
                if ub == 0 {
                    ua
                } else {
                    ua % ub
                }
            }
            "vwadd" => sa.wrapping_add(sb) as u64,
            "vwaddu" => ua.wrapping_add(ub),
            "vwsub" => sa.wrapping_sub(sb) as u64,
            "vwsubu" => ua.wrapping_sub(ub),
            "vwmul" => sa.wrapping_mul(sb) as u64,
            "vwmulu" => ua.wrapping_mul(ub),
            _ => return Err(unhandled(op)),
        };
        lanes.push(lane & out_mask);
    }
    Ok(SimValue::Vector(lanes))
}

fn exec_float_binary(
    op: &CanonicalOp,
    form: CanonicalForm,
    rest: &[Operand<SimValue>],
) -> Result<SimValue> {
    let a = expect_vector(&rest[0])?;
    let b = rhs_lanes(form.shape, &rest[1], a.len())?;

    let mut lanes = Vec::with_capacity(a.len());
    for (&ra, &rb) in a.iter().zip(&b) {
        let (fa, fb) = (f32::from_bits(ra as u32), f32::from_bits(rb as u32));
        let out = match op.base {
            "vfadd" => fa + fb,
            "vfsub" => fa - fb,
            "vfmul" => fa * fb,
            "vfdiv" => fa / fb,
            "vfmin" => fa.min(fb),
            "vfmax" => fa.max(fb),
            _ => return Err(unhandled(op)),
        };
        lanes.push(u64::from(out.to_bits()));
    }
    Ok(SimValue::Vector(lanes))
}

fn exec_compare(
    op: &CanonicalOp,
    form: CanonicalForm,
    rest: &[Operand<SimValue>],
) -> Result<SimValue> {
    let a = expect_vector(&rest[0])?;
    let b = rhs_lanes(form.shape, &rest[1], a.len())?;
    let bits = form.sew.bits();
    let mask = lane_mask(bits);

    let mut out = Vec::with_capacity(a.len());
    for (&ra, &rb) in a.iter().zip(&b) {
        let (ua, ub) = (ra & mask, rb & mask);
        let (sa, sb) = (sext_lane(ra, bits), sext_lane(rb, bits));
        out.push(match op.base {
            "vmseq" => ua == ub,
            "vmsne" => ua != ub,
            "vmslt" => sa < sb,
            "vmsltu" => ua < ub,
            "vmsle" => sa <= sb,
            "vmsleu" => ua <= ub,
            "vmsgt" => sa > sb,
            "vmsgtu" => ua > ub,
            _ => return Err(unhandled(op)),
        });
    }
    Ok(SimValue::Mask(out))
}

fn exec_carry(
    op: &CanonicalOp,
    form: CanonicalForm,
    rest: &[Operand<SimValue>],
) -> Result<SimValue> {
    let a = expect_vector(&rest[0])?;
    let b = rhs_lanes(form.shape, &rest[1], a.len())?;
    let carry = expect_mask(&rest[2])?;
    let mask = lane_mask(form.sew.bits());

    let mut lanes = Vec::with_capacity(a.len());
    for (i, (&ra, &rb)) in a.iter().zip(&b).enumerate() {
        let c = u64::from(carry.get(i).copied().unwrap_or(false));
        let lane = match op.base {
            "vadc" => ra.wrapping_add(rb).wrapping_add(c),
            "vsbc" => ra.wrapping_sub(rb).wrapping_sub(c),
            _ => return Err(unhandled(op)),
        };
        lanes.push(lane & mask);
    }
    Ok(SimValue::Vector(lanes))
}

fn exec_reduce(
    op: &CanonicalOp,
    form: CanonicalForm,
    rest: &[Operand<SimValue>],
    active: Option<&[bool]>,
) -> Result<SimValue> {
    let src = expect_vector(&rest[0])?;
    let init = expect_vector(&rest[1])?;
    let bits = form.sew.bits();
    let mask = lane_mask(bits);

    let mut acc = init.first().copied().unwrap_or(0) & mask;
    for (i, &lane) in src.iter().enumerate() {
        if active.is_some_and(|m| !m.get(i).copied().unwrap_or(false)) {
            continue;
        }
        let lane = lane & mask;
        acc = match op.base {
            "vredsum" => acc.wrapping_add(lane) & mask,
            "vredand" => acc & lane,
            "vredor" => acc | lane,
            "vredxor" => acc ^ lane,
            "vredmax" => {
                if sext_lane(lane, bits) > sext_lane(acc, bits) {
                    lane
                } else {
                    acc
                }
            }
            "vredmaxu" => acc.max(lane),
            "vredmin" => {
                if sext_lane(lane, bits) < sext_lane(acc, bits) {
                    lane
                } else {
                    acc
                }
            }
            "vredminu" => acc.min(lane),
            _ => return Err(unhandled(op)),
        };
    }
    Ok(SimValue::Vector(vec![acc]))
}

fn exec_permute(
    op: &CanonicalOp,
    form: CanonicalForm,
    rest: &[Operand<SimValue>],
) -> Result<SimValue> {
    let a = expect_vector(&rest[0])?;
    let mask = lane_mask(form.sew.bits());

    let lanes = match op.base {
        "vrgather" => {
            let idx = rhs_lanes(form.shape, &rest[1], a.len())?;
            idx.iter()
                .map(|&i| a.get(i as usize).copied().unwrap_or(0) & mask)
                .collect()
        }
        "vslideup" => {
            let offset = expect_scalar(&rest[1])? as usize;
            (0..a.len())
                .map(|i| if i >= offset { a[i - offset] & mask } else { 0 })
                .collect()
        }
        "vslidedown" => {
            let offset = expect_scalar(&rest[1])? as usize;
            (0..a.len())
                .map(|i| a.get(i + offset).copied().unwrap_or(0) & mask)
                .collect()
        }
        _ => return Err(unhandled(op)),
    };
    Ok(SimValue::Vector(lanes))
}

fn exec_convert(op: &CanonicalOp, rest: &[Operand<SimValue>]) -> Result<SimValue> {
    let a = expect_vector(&rest[0])?;
    let mut lanes = Vec::with_capacity(a.len());
    for &lane in a {
        let out = match op.base {
            "vfcvt_x_f" => f32::from_bits(lane as u32) as i32 as u32,
            "vfcvt_f_x" => (lane as i32 as f32).to_bits(),
            "vfcvt_f_xu" => (lane as u32 as f32).to_bits(),
            _ => return Err(unhandled(op)),
        };
        lanes.push(u64::from(out));
    }
    Ok(SimValue::Vector(lanes))
}

/// Masked-off lanes read as zero (false for mask results).
fn apply_mask(value: SimValue, mask: &[bool]) -> SimValue {
    match value {
        SimValue::Vector(lanes) => SimValue::Vector(
            lanes
                .into_iter()
                .enumerate()
                .map(|(i, lane)| {
                    if mask.get(i).copied().unwrap_or(false) {
                        lane
                    } else {
                        0
                    }
                })
                .collect(),
        ),
        SimValue::Mask(bits) => SimValue::Mask(
            bits.into_iter()
                .enumerate()
                .map(|(i, b)| b && mask.get(i).copied().unwrap_or(false))
                .collect(),
        ),
        other => other,
    }
}

fn unhandled(op: &CanonicalOp) -> Error {
    Error::Unsupported(format!("reference executor: `{}`", op.name))
}

fn missing(op: &CanonicalOp) -> Error {
    Error::Internal(format!("`{}`: operand list too short", op.name))
}
