//! The vector operation namespace: vocabulary types, the symbolic-name
//! grammar, the static catalog and the resolution table built from it.

mod catalog;
mod elem;
mod name;
mod shape;
mod table;

pub use elem::{CANONICAL_SCALAR_BITS, ElementType, Lmul, Sew, TypeSet};
pub use name::{BuiltinName, MASK_SUFFIX};
pub use shape::{OpClass, OperandShape, ParamKind, Signature, unmasked_params};
pub use table::{
    BuiltinForm, BuiltinId, BuiltinInfo, CanonicalForm, CanonicalOp, CanonicalOpId,
    OperandTransform, ResolutionEntry, ResolutionTable, TransformKind,
};
