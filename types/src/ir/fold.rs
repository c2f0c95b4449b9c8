use super::{OmniType, TypeId};

/// Trait for rewriting the edges of types in place.
///
/// The model is an arena, so "folding" a type means deciding, for every
/// outgoing edge, which id it should point at afterwards. The default
/// implementation keeps every edge as-is.
///
/// # Example
///
/// ```
/// use omnigen_types::{OmniModel, PrimitiveKind, TypeFolder, TypeId};
///
/// struct Redirect {
///     from: TypeId,
///     to: TypeId,
/// }
///
/// impl TypeFolder for Redirect {
///     fn fold_ref(&mut self, id: TypeId) -> TypeId {
///         if id == self.from { self.to } else { id }
///     }
/// }
///
/// let mut model = OmniModel::new("m");
/// let int = model.primitive(PrimitiveKind::Integer);
/// let long = model.primitive(PrimitiveKind::Long);
/// let arr = model.array(int);
///
/// model.fold_type(arr, &mut Redirect { from: int, to: long });
/// assert_eq!(model.children(arr), vec![long]);
/// ```
pub trait TypeFolder {
    /// Map a single edge.
    fn fold_ref(&mut self, id: TypeId) -> TypeId {
        id
    }

    /// Rewrite every edge of `ty`.
    ///
    /// Override `fold_ref` instead of this method.
    fn super_fold_type(&mut self, ty: &mut OmniType) {
        match ty {
            OmniType::Primitive(_) | OmniType::HardcodedReference { .. } => {}
            OmniType::Object(o) => {
                for p in o.properties.iter_mut() {
                    p.ty = self.fold_ref(p.ty);
                }
                self.fold_opt(&mut o.extended_by);
            }
            OmniType::Interface {
                of, extended_by, ..
            } => {
                *of = self.fold_ref(*of);
                self.fold_opt(extended_by);
            }
            OmniType::Composition(c) => {
                for t in c.types.iter_mut() {
                    *t = self.fold_ref(*t);
                }
            }
            OmniType::GenericSource {
                of,
                source_identifiers,
            } => {
                *of = self.fold_ref(*of);
                for t in source_identifiers.iter_mut() {
                    *t = self.fold_ref(*t);
                }
            }
            OmniType::GenericSourceIdentifier {
                lower_bound,
                upper_bound,
                ..
            } => {
                self.fold_opt(lower_bound);
                self.fold_opt(upper_bound);
            }
            OmniType::GenericTarget {
                source,
                target_identifiers,
            } => {
                *source = self.fold_ref(*source);
                for t in target_identifiers.iter_mut() {
                    *t = self.fold_ref(*t);
                }
            }
            OmniType::GenericTargetIdentifier {
                source_identifier,
                ty,
            } => {
                *source_identifier = self.fold_ref(*source_identifier);
                *ty = self.fold_ref(*ty);
            }
            OmniType::Unknown { upper_bound, .. } => self.fold_opt(upper_bound),
            OmniType::Dictionary { key, value } => {
                *key = self.fold_ref(*key);
                *value = self.fold_ref(*value);
            }
            OmniType::Array { of } => *of = self.fold_ref(*of),
            OmniType::Enum(e) => self.fold_opt(&mut e.extended_by),
            OmniType::ExternalModelReference { of, .. } | OmniType::Decorating { of, .. } => {
                *of = self.fold_ref(*of)
            }
        }
    }

    fn fold_opt(&mut self, slot: &mut Option<TypeId>) {
        if let Some(id) = slot {
            *id = self.fold_ref(*id);
        }
    }
}

/// Replaces every edge pointing at `from` with `to`.
pub struct SwapFolder {
    pub from: TypeId,
    pub to: TypeId,
    pub swapped: usize,
}

impl SwapFolder {
    pub fn new(from: TypeId, to: TypeId) -> Self {
        Self {
            from,
            to,
            swapped: 0,
        }
    }
}

impl TypeFolder for SwapFolder {
    fn fold_ref(&mut self, id: TypeId) -> TypeId {
        if id == self.from {
            self.swapped += 1;
            self.to
        } else {
            id
        }
    }
}
