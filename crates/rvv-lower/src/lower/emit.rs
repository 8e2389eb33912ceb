//! Invocation emission: one call to the canonical backend operation.

use crate::op::CanonicalOp;
use crate::{Error, Result};

use super::backend::{Backend, Operand};

pub(crate) fn emit_invocation<B: Backend>(
    backend: &mut B,
    op: &CanonicalOp,
    operands: Vec<Operand<B::Value>>,
) -> Result<B::Value> {
    // Masking and widening are already reflected in the list; a mismatch
    // here means the table and the pipeline disagree.
    if operands.len() != op.arity() {
        return Err(Error::Internal(format!(
            "`{}` expects {} operands, normalizer produced {}",
            op.name,
            op.arity(),
            operands.len()
        )));
    }

    tracing::trace!(op = %op.name, operands = operands.len(), "emitting canonical call");
    backend.emit_call(op, operands)
}
