#![allow(
    clippy::cast_possible_truncation, // intentional: dense ids are u32, lanes are width-truncated u64
    clippy::missing_errors_doc // error conditions are documented on the Error enum
)]

pub mod error;
pub mod lower;
pub mod op;

/// Reference executor for writing unit and integration tests.
///
/// Only available when running tests or when the `test-harness` feature is
/// enabled.
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub use error::{Error, Result};
pub use lower::{ArgExpr, Backend, Lowered, Operand, lower};
pub use op::{BuiltinId, BuiltinName, CanonicalOp, CanonicalOpId, ResolutionTable};
