//! Property-based tests for the resolution table.
//!
//! Uses `proptest` to pick random builtins and verify invariants:
//! - Symbolic names decompose and re-encode exactly
//! - Signed/unsigned spellings of one form resolve identically
//! - Masked variants shift every transform index by one
//! - Random argument lists never panic the pipeline

use proptest::prelude::*;
use rvv_lower::op::{BuiltinName, MASK_SUFFIX, ParamKind, ResolutionTable};
use rvv_lower::test_harness::{SimValue, VectorMachine};
use rvv_lower::{ArgExpr, BuiltinId, Error, lower};

fn table() -> &'static ResolutionTable {
    use std::sync::OnceLock;
    static TABLE: OnceLock<ResolutionTable> = OnceLock::new();
    TABLE.get_or_init(ResolutionTable::build)
}

fn builtin_index() -> impl Strategy<Value = u32> {
    0..u32::try_from(table().len()).expect("table fits in u32")
}

proptest! {
    #[test]
    fn names_round_trip(index in builtin_index()) {
        let table = table();
        let id = BuiltinId::from_raw(index);
        let info = table.builtin(id).expect("in range");
        if let Some(parsed) = BuiltinName::parse(&info.name) {
            prop_assert_eq!(parsed.to_string(), info.name.clone());
            prop_assert_eq!(
                parsed.canonical(),
                table.canonical_op(info.entry.canonical).name.clone()
            );
        } else {
            // Only the csr entry sits outside the grammar.
            prop_assert_eq!(info.name.as_str(), "vsetvl");
        }
    }

    #[test]
    fn sign_pairs_alias(index in builtin_index()) {
        let table = table();
        let id = BuiltinId::from_raw(index);
        let info = table.builtin(id).expect("in range");
        let Some(form) = info.form else { return Ok(()) };
        let Some(flipped) = form.ty.sign_flipped() else { return Ok(()) };

        let sibling = BuiltinName::new(info.base, form.shape, flipped, form.lmul, form.masked);
        if let Some(other) = table.lookup_name(&sibling.to_string()) {
            prop_assert_eq!(
                table.resolve(id).expect("total").canonical,
                table.resolve(other).expect("total").canonical
            );
        }
    }

    #[test]
    fn masked_shift_is_exactly_one(index in builtin_index()) {
        let table = table();
        let id = BuiltinId::from_raw(index);
        let info = table.builtin(id).expect("in range");
        let Some(name) = info.name.strip_suffix(MASK_SUFFIX) else { return Ok(()) };
        let unmasked = table
            .builtin(table.lookup_name(name).expect("unmasked sibling"))
            .expect("in range");

        prop_assert_eq!(info.signature.arity(), unmasked.signature.arity() + 1);
        for (m, u) in info.entry.transforms.iter().zip(&unmasked.entry.transforms) {
            prop_assert_eq!(m.index, u.index + 1);
        }
    }

    #[test]
    fn pipeline_never_panics(index in builtin_index(), seed in any::<u64>()) {
        let table = table();
        let id = BuiltinId::from_raw(index);
        let info = table.builtin(id).expect("in range");
        let mut vm = VectorMachine::new();
        vm.set_vl(4);

        // Type-correct arguments derived from the signature; immediates
        // deliberately folded so only executor coverage varies.
        let args: Vec<ArgExpr<SimValue>> = info
            .signature
            .params
            .iter()
            .map(|p| match p {
                ParamKind::Vector => ArgExpr::Value(SimValue::Vector(vec![
                    seed & 0xff,
                    (seed >> 8) & 0xff,
                    (seed >> 16) & 0xff,
                    (seed >> 24) & 0xff,
                ])),
                ParamKind::Scalar => ArgExpr::Value(SimValue::Scalar((seed & 0x7f) as i64)),
                ParamKind::Imm => ArgExpr::Const((seed & 0xf) as i64),
                ParamKind::Mask => {
                    ArgExpr::Value(SimValue::Mask(vec![true, false, true, true]))
                }
                ParamKind::Ptr => ArgExpr::Value(SimValue::Scalar(0x100)),
            })
            .collect();

        // Resolution itself must always succeed; the executor may still
        // refuse shapes it does not model.
        if let Err(err) = lower(table, &mut vm, id, args) {
            prop_assert!(
                matches!(err, Error::Unsupported(_)),
                "{}: {err}",
                info.name
            );
        }
    }
}
