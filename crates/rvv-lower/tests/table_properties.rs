//! Whole-table invariant checks.
//!
//! These sweep every entry the table claims to handle rather than sampling:
//! totality, signedness aliasing, the masked index shift, and the exact
//! conditions under which the scalar-widening rewrite appears.

use rvv_lower::op::{
    BuiltinName, MASK_SUFFIX, OperandShape, ParamKind, ResolutionTable, TransformKind,
};
use rvv_lower::BuiltinId;

#[test]
fn every_claimed_builtin_resolves() {
    let table = ResolutionTable::build();
    assert!(table.len() > 3000);
    for (id, info) in table.iter() {
        assert!(table.resolve(id).is_some(), "{}", info.name);
        assert_eq!(table.lookup_name(&info.name), Some(id), "{}", info.name);
    }
}

#[test]
fn foreign_identifiers_miss_silently() {
    let table = ResolutionTable::build();
    let foreign = BuiltinId::from_raw(u32::try_from(table.len()).unwrap());
    assert!(table.resolve(foreign).is_none());
    for name in ["memcpy", "vadd", "vadd_vv_i64m1", "__builtin_popcount"] {
        assert!(table.lookup_name(name).is_none(), "{name}");
    }
}

#[test]
fn signedness_never_changes_the_canonical_op() {
    let table = ResolutionTable::build();
    let mut pairs = 0;
    for (id, info) in table.iter() {
        let Some(form) = info.form else { continue };
        let Some(flipped_ty) = form.ty.sign_flipped() else {
            continue;
        };
        let flipped =
            BuiltinName::new(info.base, form.shape, flipped_ty, form.lmul, form.masked);
        // Sign-restricted base operations have no flipped sibling; the
        // insensitive ones must alias exactly.
        if let Some(other) = table.lookup_name(&flipped.to_string()) {
            assert_eq!(
                table.resolve(id).unwrap().canonical,
                table.resolve(other).unwrap().canonical,
                "{} vs {}",
                info.name,
                flipped
            );
            pairs += 1;
        }
    }
    assert!(pairs > 1000, "only {pairs} aliased pairs");
}

#[test]
fn masked_variants_shift_transform_indices_by_one() {
    let table = ResolutionTable::build();
    let mut masked_seen = 0;
    for (_, info) in table.iter() {
        let Some(form) = info.form else { continue };
        if !form.masked {
            continue;
        }
        masked_seen += 1;

        let unmasked_name = info
            .name
            .strip_suffix(MASK_SUFFIX)
            .expect("masked name must end with the mask suffix");
        let unmasked_id = table
            .lookup_name(unmasked_name)
            .unwrap_or_else(|| panic!("{unmasked_name} missing"));
        let unmasked = table.builtin(unmasked_id).unwrap();

        assert_eq!(
            info.signature.arity(),
            unmasked.signature.arity() + 1,
            "{}",
            info.name
        );
        assert_eq!(info.signature.params[0], ParamKind::Mask, "{}", info.name);
        assert_eq!(
            info.entry.transforms.len(),
            unmasked.entry.transforms.len(),
            "{}",
            info.name
        );
        for (m, u) in info.entry.transforms.iter().zip(&unmasked.entry.transforms) {
            assert_eq!(m.index, u.index + 1, "{}", info.name);
            assert_eq!(m.kind, u.kind, "{}", info.name);
        }

        let masked_canonical = &table.canonical_op(info.entry.canonical).name;
        let unmasked_canonical = &table.canonical_op(unmasked.entry.canonical).name;
        assert_eq!(
            masked_canonical.strip_suffix(MASK_SUFFIX),
            Some(unmasked_canonical.as_str()),
            "{}",
            info.name
        );
    }
    assert!(masked_seen > 1000);
}

#[test]
fn widening_rewrite_exactly_on_narrow_integer_scalars() {
    let table = ResolutionTable::build();
    for (_, info) in table.iter() {
        let scalar_pos = info
            .signature
            .params
            .iter()
            .position(|p| *p == ParamKind::Scalar);

        let narrow_int_scalar = match info.form {
            Some(form) => {
                scalar_pos.is_some()
                    && !form.ty.is_float()
                    && form.ty.sew().needs_scalar_widening()
            }
            // vsetvl's length operand is not element-typed.
            None => false,
        };

        if narrow_int_scalar {
            let form = info.form.unwrap();
            assert_eq!(info.entry.transforms.len(), 1, "{}", info.name);
            let t = &info.entry.transforms[0];
            assert_eq!(Some(t.index), scalar_pos, "{}", info.name);
            assert_eq!(
                t.kind,
                TransformKind::WidenScalar { from: form.ty.sew() },
                "{}",
                info.name
            );
        } else {
            assert!(info.entry.transforms.is_empty(), "{}", info.name);
        }

        // Immediate shapes never carry the rewrite, whatever the width.
        if info.form.is_some_and(|f| f.shape.is_immediate()) {
            assert!(info.entry.transforms.is_empty(), "{}", info.name);
        }
    }
}

#[test]
fn names_round_trip_through_the_grammar() {
    let table = ResolutionTable::build();
    for (_, info) in table.iter() {
        let Some(form) = info.form else {
            assert_eq!(info.name, "vsetvl");
            continue;
        };
        let parsed = BuiltinName::parse(&info.name)
            .unwrap_or_else(|| panic!("{} does not parse", info.name));
        assert_eq!(parsed.base, info.base);
        assert_eq!(parsed.shape, form.shape);
        assert_eq!(parsed.ty, form.ty);
        assert_eq!(parsed.lmul, form.lmul);
        assert_eq!(parsed.masked, form.masked);
        assert_eq!(parsed.to_string(), info.name);
        assert_eq!(
            parsed.canonical(),
            table.canonical_op(info.entry.canonical).name,
            "{}",
            info.name
        );
    }
}

#[test]
fn float_scalar_forms_are_never_widened() {
    let table = ResolutionTable::build();
    for (_, info) in table.iter() {
        let Some(form) = info.form else { continue };
        if form.shape == OperandShape::Vf || form.shape == OperandShape::SplatF {
            assert!(info.entry.transforms.is_empty(), "{}", info.name);
        }
    }
}

#[test]
fn carry_forms_keep_their_trailing_mask() {
    let table = ResolutionTable::build();
    for (_, info) in table.iter() {
        let Some(form) = info.form else { continue };
        if form.shape.has_carry_operand() {
            assert!(!form.masked, "{}", info.name);
            assert_eq!(
                info.signature.params.last(),
                Some(&ParamKind::Mask),
                "{}",
                info.name
            );
        }
    }
}
