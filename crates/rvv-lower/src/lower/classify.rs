//! Constant-position classification.
//!
//! Computes the bitmask of argument positions that must be folded to
//! compile-time constants. The signature table and this classifier are
//! generated from the same catalog and must agree; any disagreement is an
//! internal authoring failure, reported with context rather than asserted.

use crate::op::{BuiltinInfo, OpClass, ParamKind, unmasked_params};
use crate::{Error, Result};

/// Bitmask over argument positions that must be compile-time constants.
pub fn const_positions(info: &BuiltinInfo) -> Result<u32> {
    let expected = expected_arity(info);
    if info.signature.arity() != expected {
        return Err(Error::Internal(format!(
            "signature for `{}` lists {} parameters but its shape implies {}",
            info.name,
            info.signature.arity(),
            expected
        )));
    }

    let mut mask = 0u32;
    for (index, param) in info.signature.params.iter().enumerate() {
        if *param == ParamKind::Imm {
            mask |= 1 << index;
        }
    }
    Ok(mask)
}

/// Arity recomputed from the builtin's axes, independently of the stored
/// signature.
fn expected_arity(info: &BuiltinInfo) -> usize {
    match info.form {
        Some(form) => unmasked_params(info.class, form.shape).len() + usize::from(form.masked),
        // vsetvl: application vector length + vtype mode selector.
        None => {
            debug_assert_eq!(info.class, OpClass::Csr);
            2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{ResolutionTable, Signature};

    #[test]
    fn immediate_positions_are_flagged() {
        let table = ResolutionTable::build();

        let vi = table.lookup_name("vadd_vi_i16m1").unwrap();
        let mask = const_positions(table.builtin(vi).unwrap()).unwrap();
        assert_eq!(mask, 0b10);

        let vi_masked = table.lookup_name("vadd_vi_i16m1_m").unwrap();
        let mask = const_positions(table.builtin(vi_masked).unwrap()).unwrap();
        assert_eq!(mask, 0b100);

        let vim = table.lookup_name("vadc_vim_u32m1").unwrap();
        let mask = const_positions(table.builtin(vim).unwrap()).unwrap();
        assert_eq!(mask, 0b10);
    }

    #[test]
    fn runtime_only_signatures_have_an_empty_mask() {
        let table = ResolutionTable::build();
        for name in ["vadd_vv_i8m1", "vadd_vx_i8m1", "vle_v_f32m1_m"] {
            let id = table.lookup_name(name).unwrap();
            assert_eq!(const_positions(table.builtin(id).unwrap()).unwrap(), 0);
        }
    }

    #[test]
    fn corrupted_signature_is_an_internal_error() {
        let table = ResolutionTable::build();
        let id = table.lookup_name("vadd_vv_i16m1").unwrap();
        let mut info = table.builtin(id).unwrap().clone();
        info.signature = Signature {
            params: vec![ParamKind::Vector],
        };
        let err = const_positions(&info).unwrap_err();
        assert!(matches!(err, Error::Internal(_)));
    }
}
