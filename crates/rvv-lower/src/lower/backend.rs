//! The seam between the resolver and the surrounding code generator.

use crate::Result;
use crate::op::{CanonicalOp, Sew};

/// One argument expression as handed down by the front end. General
/// expression evaluation happens upstream; by the time a call site reaches
/// the resolver each argument is either an already-folded integer constant
/// or a runtime value the backend produced earlier.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgExpr<V> {
    /// Compile-time integer constant.
    Const(i64),
    /// Runtime value.
    Value(V),
}

/// One evaluated operand, ready for invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<V> {
    Value(V),
    Const(i64),
}

/// The code generator the resolver drives. Implementations own value
/// representation and code emission; the resolver only tells them what to do.
pub trait Backend {
    type Value;

    /// Sign-extend a narrow element-typed scalar value to the canonical
    /// scalar width ([`crate::op::CANONICAL_SCALAR_BITS`]).
    fn widen_scalar(&mut self, value: Self::Value, from: Sew) -> Result<Self::Value>;

    /// Emit one call to a canonical vector operation and return its result
    /// value. The operand list is already normalized; its length matches the
    /// operation's declared arity.
    fn emit_call(
        &mut self,
        op: &CanonicalOp,
        operands: Vec<Operand<Self::Value>>,
    ) -> Result<Self::Value>;
}
