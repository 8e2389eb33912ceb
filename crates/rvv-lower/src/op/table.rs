//! The resolution table: builtin identifier → canonical operation descriptor.
//!
//! Built once by expanding the catalog over every shape, element type,
//! grouping factor and mask variant; read-only afterwards. Signedness
//! aliasing falls out of interning canonical operations by name: the signed
//! and unsigned spellings of one builtin collapse to the same canonical name
//! and therefore the same [`CanonicalOpId`].

use std::collections::HashMap;

use super::catalog::{CATALOG, OpSpec};
use super::elem::{ElementType, Lmul, Sew};
use super::name::BuiltinName;
use super::shape::{OpClass, OperandShape, ParamKind, Signature, unmasked_params};

/// Dense identifier of one builtin entry point. Assigned in table order at
/// construction time and never recycled. Identifiers outside the table's
/// range belong to other builtin families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuiltinId(u32);

impl BuiltinId {
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense identifier of one canonical backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalOpId(u32);

impl CanonicalOpId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// An operand rewrite applied before invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// Sign-extend a narrow element-typed broadcast scalar to the canonical
    /// scalar width.
    WidenScalar { from: Sew },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandTransform {
    pub index: usize,
    pub kind: TransformKind,
}

/// What one builtin resolves to: the canonical operation plus the operand
/// rewrites its calling convention requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionEntry {
    pub canonical: CanonicalOpId,
    pub transforms: Vec<OperandTransform>,
}

/// Axes of one vector-shaped builtin (everything except `vsetvl`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinForm {
    pub shape: OperandShape,
    pub ty: ElementType,
    pub lmul: Lmul,
    pub masked: bool,
}

/// Axes of one vector-shaped canonical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalForm {
    pub shape: OperandShape,
    pub sew: Sew,
    pub float: bool,
    pub lmul: Lmul,
    pub masked: bool,
}

/// One canonical backend operation.
#[derive(Debug, Clone)]
pub struct CanonicalOp {
    pub name: String,
    pub base: &'static str,
    pub class: OpClass,
    /// `None` for the csr entry (`vsetvl`).
    pub form: Option<CanonicalForm>,
}

impl CanonicalOp {
    /// Number of operands the operation's calling convention declares.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self.form {
            Some(form) => {
                unmasked_params(self.class, form.shape).len() + usize::from(form.masked)
            }
            None => 2,
        }
    }
}

/// Everything the table records about one builtin.
#[derive(Debug, Clone)]
pub struct BuiltinInfo {
    pub name: String,
    pub base: &'static str,
    pub class: OpClass,
    /// `None` for the csr entry (`vsetvl`).
    pub form: Option<BuiltinForm>,
    pub signature: Signature,
    pub entry: ResolutionEntry,
}

/// The immutable builtin → canonical-operation mapping. Construct once with
/// [`ResolutionTable::build`] and pass by reference into the code generator.
pub struct ResolutionTable {
    builtins: Vec<BuiltinInfo>,
    canonical: Vec<CanonicalOp>,
    by_name: HashMap<String, BuiltinId>,
    canonical_by_name: HashMap<String, CanonicalOpId>,
}

impl ResolutionTable {
    #[must_use]
    pub fn build() -> Self {
        let mut table = Self {
            builtins: Vec::new(),
            canonical: Vec::new(),
            by_name: HashMap::new(),
            canonical_by_name: HashMap::new(),
        };

        for spec in CATALOG {
            for &shape in spec.shapes {
                for &ty in spec.types.members() {
                    if !spec.sew.contains(&ty.sew()) {
                        continue;
                    }
                    for lmul in Lmul::ALL {
                        table.add_vector_builtin(spec, shape, ty, lmul, false);
                        if spec.maskable {
                            table.add_vector_builtin(spec, shape, ty, lmul, true);
                        }
                    }
                }
            }
        }
        table.add_vsetvl();

        tracing::debug!(
            builtins = table.builtins.len(),
            canonical_ops = table.canonical.len(),
            "resolution table built"
        );
        table
    }

    /// Map a symbolic name to its identifier. `None` for names outside this
    /// subsystem's namespace.
    #[must_use]
    pub fn lookup_name(&self, name: &str) -> Option<BuiltinId> {
        self.by_name.get(name).copied()
    }

    /// Resolve an identifier. `None` is the domain-miss signal: the
    /// identifier belongs to some other builtin family, and the caller is
    /// expected to try other resolvers. It is never an error.
    #[must_use]
    pub fn resolve(&self, id: BuiltinId) -> Option<&ResolutionEntry> {
        self.builtins.get(id.index()).map(|b| &b.entry)
    }

    #[must_use]
    pub fn builtin(&self, id: BuiltinId) -> Option<&BuiltinInfo> {
        self.builtins.get(id.index())
    }

    #[must_use]
    pub fn canonical_op(&self, id: CanonicalOpId) -> &CanonicalOp {
        &self.canonical[id.index()]
    }

    #[must_use]
    pub fn lookup_canonical(&self, name: &str) -> Option<CanonicalOpId> {
        self.canonical_by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuiltinId, &BuiltinInfo)> {
        self.builtins
            .iter()
            .enumerate()
            .map(|(i, b)| (BuiltinId(i as u32), b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.builtins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }

    #[must_use]
    pub fn canonical_len(&self) -> usize {
        self.canonical.len()
    }

    fn add_vector_builtin(
        &mut self,
        spec: &OpSpec,
        shape: OperandShape,
        ty: ElementType,
        lmul: Lmul,
        masked: bool,
    ) {
        let name = BuiltinName::new(spec.base, shape, ty, lmul, masked);
        let canonical = self.intern_canonical(
            name.canonical(),
            spec,
            CanonicalForm {
                shape,
                sew: ty.sew(),
                float: ty.is_float(),
                lmul,
                masked,
            },
        );

        let mut params = Vec::with_capacity(4);
        if masked {
            params.push(ParamKind::Mask);
        }
        params.extend_from_slice(unmasked_params(spec.class, shape));
        let signature = Signature { params };

        // The widening rewrite attaches to the broadcast-scalar position of
        // narrow integer forms. Computing the index from the final signature
        // (mask included) keeps masked variants shifted by construction.
        let transforms = signature
            .params
            .iter()
            .enumerate()
            .filter(|&(_, p)| *p == ParamKind::Scalar)
            .filter(|_| !ty.is_float() && ty.sew().needs_scalar_widening())
            .map(|(index, _)| OperandTransform {
                index,
                kind: TransformKind::WidenScalar { from: ty.sew() },
            })
            .collect();

        self.push_builtin(BuiltinInfo {
            name: name.to_string(),
            base: spec.base,
            class: spec.class,
            form: Some(BuiltinForm {
                shape,
                ty,
                lmul,
                masked,
            }),
            signature,
            entry: ResolutionEntry {
                canonical,
                transforms,
            },
        });
    }

    fn add_vsetvl(&mut self) {
        let canonical = CanonicalOpId(self.canonical.len() as u32);
        self.canonical.push(CanonicalOp {
            name: "vsetvl".to_string(),
            base: "vsetvl",
            class: OpClass::Csr,
            form: None,
        });
        self.canonical_by_name
            .insert("vsetvl".to_string(), canonical);

        self.push_builtin(BuiltinInfo {
            name: "vsetvl".to_string(),
            base: "vsetvl",
            class: OpClass::Csr,
            form: None,
            // Application vector length plus the constant-required vtype
            // mode selector.
            signature: Signature {
                params: vec![ParamKind::Scalar, ParamKind::Imm],
            },
            entry: ResolutionEntry {
                canonical,
                transforms: Vec::new(),
            },
        });
    }

    fn intern_canonical(
        &mut self,
        name: String,
        spec: &OpSpec,
        form: CanonicalForm,
    ) -> CanonicalOpId {
        if let Some(&id) = self.canonical_by_name.get(&name) {
            return id;
        }
        let id = CanonicalOpId(self.canonical.len() as u32);
        self.canonical.push(CanonicalOp {
            name: name.clone(),
            base: spec.base,
            class: spec.class,
            form: Some(form),
        });
        self.canonical_by_name.insert(name, id);
        id
    }

    fn push_builtin(&mut self, info: BuiltinInfo) {
        let id = BuiltinId(self.builtins.len() as u32);
        let previous = self.by_name.insert(info.name.clone(), id);
        debug_assert!(previous.is_none(), "duplicate builtin name {}", info.name);
        self.builtins.push(info);
    }
}
