//! The lowering pipeline: classify → evaluate → resolve → normalize → emit.
//!
//! Each call site is processed once, statelessly; the table is shared and
//! read-only. Errors split three ways: internal consistency failures abort
//! the call site hard, a non-constant argument in a constant-required
//! position is a user diagnostic, and an identifier outside the table is a
//! silent domain miss for the next resolver family to pick up.

mod backend;
pub(crate) mod classify;
mod emit;
mod evaluate;
mod normalize;

pub use backend::{ArgExpr, Backend, Operand};
pub use classify::const_positions;
pub use normalize::sign_extend;

use crate::Result;
use crate::op::{BuiltinId, ResolutionTable};

/// Outcome of lowering one builtin call site.
#[derive(Debug)]
pub enum Lowered<V> {
    /// The call was resolved and emitted; the backend's result value.
    Emitted(V),
    /// The identifier belongs to another builtin family. Arguments are
    /// handed back untouched so the caller can try other resolvers.
    NotHandled(Vec<ArgExpr<V>>),
}

/// Lower one builtin call site to a canonical vector operation.
pub fn lower<B: Backend>(
    table: &ResolutionTable,
    backend: &mut B,
    id: BuiltinId,
    args: Vec<ArgExpr<B::Value>>,
) -> Result<Lowered<B::Value>> {
    let Some(info) = table.builtin(id) else {
        return Ok(Lowered::NotHandled(args));
    };

    let const_mask = classify::const_positions(info)?;
    let operands = evaluate::evaluate_args(info, const_mask, args)?;
    let operands = normalize::normalize_operands(backend, &info.entry.transforms, operands)?;
    let op = table.canonical_op(info.entry.canonical);
    let value = emit::emit_invocation(backend, op, operands)?;
    Ok(Lowered::Emitted(value))
}
