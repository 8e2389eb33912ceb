//! Operand evaluation.
//!
//! Folds constant-required positions to integer constants and passes runtime
//! values through. A runtime expression in a constant-required position is a
//! user error at the call site, not an internal failure.

use crate::op::BuiltinInfo;
use crate::{Error, Result};

use super::backend::{ArgExpr, Operand};

pub(crate) fn evaluate_args<V>(
    info: &BuiltinInfo,
    const_mask: u32,
    args: Vec<ArgExpr<V>>,
) -> Result<Vec<Operand<V>>> {
    if args.len() != info.signature.arity() {
        return Err(Error::Internal(format!(
            "`{}` reached the resolver with {} arguments, signature lists {}",
            info.name,
            args.len(),
            info.signature.arity()
        )));
    }

    args.into_iter()
        .enumerate()
        .map(|(index, arg)| {
            let must_be_const = const_mask & (1 << index) != 0;
            match arg {
                ArgExpr::Const(value) => Ok(Operand::Const(value)),
                ArgExpr::Value(_) if must_be_const => Err(Error::NotAConstant {
                    builtin: info.name.clone(),
                    index,
                }),
                ArgExpr::Value(value) => Ok(Operand::Value(value)),
            }
        })
        .collect()
}
