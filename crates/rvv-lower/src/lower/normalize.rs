//! Operand normalization.
//!
//! Applies the resolution entry's transform rules to the evaluated operand
//! list. Runtime scalars are widened through the backend; constants fold at
//! resolve time. List length never changes here.

// Sign-extension folds reinterpret the low element bits of an i64 constant.
#![allow(clippy::cast_possible_truncation)]

use crate::Result;
use crate::op::{OperandTransform, Sew, TransformKind};

use super::backend::{Backend, Operand};

pub(crate) fn normalize_operands<B: Backend>(
    backend: &mut B,
    transforms: &[OperandTransform],
    operands: Vec<Operand<B::Value>>,
) -> Result<Vec<Operand<B::Value>>> {
    let mut normalized = Vec::with_capacity(operands.len());
    for (index, operand) in operands.into_iter().enumerate() {
        let transform = transforms.iter().find(|t| t.index == index);
        normalized.push(match (transform, operand) {
            (Some(t), Operand::Value(value)) => {
                let TransformKind::WidenScalar { from } = t.kind;
                Operand::Value(backend.widen_scalar(value, from)?)
            }
            (Some(t), Operand::Const(value)) => {
                let TransformKind::WidenScalar { from } = t.kind;
                Operand::Const(sign_extend(value, from))
            }
            (None, operand) => operand,
        });
    }
    Ok(normalized)
}

/// Sign-extend the low `from` bits of a constant.
#[must_use]
pub fn sign_extend(value: i64, from: Sew) -> i64 {
    match from {
        Sew::E8 => i64::from(value as i8),
        Sew::E16 => i64::from(value as i16),
        Sew::E32 => i64::from(value as i32),
    }
}
