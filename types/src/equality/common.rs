use super::{PropertyDiffKind, TypeDiffKind, matches_any_prop_diff};
use crate::{
    CompositionKind, OmniModel, OmniType, PrimitiveKind, PrimitiveType, TargetFeatures, TypeId,
    UnknownKind,
};
use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

/// How to obtain the common type of two or more types.
///
/// Most answers are an existing type (the wider numeric kind, a shared
/// ancestor). The others describe a type derived from existing ones, which
/// only gets allocated when [`CommonType::materialize`] is called.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommonType {
    Existing(TypeId),
    Unknown,
    /// The inner type without its literal value.
    Generalized(Box<CommonType>),
    Nullable(Box<CommonType>),
    Array(Box<CommonType>),
    Dictionary(Box<CommonType>, Box<CommonType>),
    GenericTarget {
        source: TypeId,
        identifiers: Vec<(TypeId, CommonType)>,
    },
}

impl CommonType {
    pub fn existing(&self) -> Option<TypeId> {
        match self {
            CommonType::Existing(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, CommonType::Unknown)
    }

    fn nullable(self) -> Self {
        match self {
            CommonType::Nullable(_) => self,
            other => CommonType::Nullable(Box::new(other)),
        }
    }

    fn generalized(self) -> Self {
        match self {
            CommonType::Generalized(_) => self,
            other => CommonType::Generalized(Box::new(other)),
        }
    }

    /// Turn the derivation into a type of `model`, allocating only what
    /// does not exist yet.
    pub fn materialize(&self, model: &mut OmniModel, unknown_kind: UnknownKind) -> TypeId {
        match self {
            CommonType::Existing(id) => *id,
            CommonType::Unknown => model.unknown(unknown_kind),
            CommonType::Generalized(inner) => {
                let id = inner.materialize(model, unknown_kind);
                match model.get(id) {
                    OmniType::Primitive(p) if p.literal.is_some() => {
                        let general = PrimitiveType {
                            kind: p.kind,
                            literal: None,
                            nullable: p.nullable,
                        };
                        model.add(OmniType::Primitive(general))
                    }
                    _ => id,
                }
            }
            CommonType::Nullable(inner) => {
                let id = inner.materialize(model, unknown_kind);
                match model.get(id) {
                    OmniType::Primitive(p) if !p.nullable => {
                        let nullable = PrimitiveType {
                            nullable: true,
                            ..p.clone()
                        };
                        model.add(OmniType::Primitive(nullable))
                    }
                    _ => id,
                }
            }
            CommonType::Array(of) => {
                let of = of.materialize(model, unknown_kind);
                model.array(of)
            }
            CommonType::Dictionary(key, value) => {
                let key = key.materialize(model, unknown_kind);
                let value = value.materialize(model, unknown_kind);
                model.dictionary(key, value)
            }
            CommonType::GenericTarget {
                source,
                identifiers,
            } => {
                let bound = identifiers
                    .iter()
                    .map(|(source_identifier, ty)| {
                        let ty = ty.materialize(model, unknown_kind);
                        model.generic_target_identifier(*source_identifier, ty)
                    })
                    .collect();
                model.generic_target(*source, bound)
            }
        }
    }
}

/// A common type together with the differences that had to be bridged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Common {
    pub ty: CommonType,
    pub diffs: Vec<TypeDiffKind>,
}

impl Common {
    pub fn same(id: TypeId) -> Self {
        Self {
            ty: CommonType::Existing(id),
            diffs: Vec::new(),
        }
    }

    fn map_ty(self, f: impl FnOnce(CommonType) -> CommonType) -> Self {
        Self {
            ty: f(self.ty),
            diffs: self.diffs,
        }
    }
}

/// Answers equality questions about the types of one model.
///
/// The differ only reads the model. Object comparisons recurse into
/// properties, so pairs currently being compared are tracked and treated
/// as equal when met again.
pub struct TypeDiffer<'m> {
    model: &'m OmniModel,
    features: TargetFeatures,
    in_progress: RefCell<Vec<(TypeId, TypeId)>>,
}

fn bits(kind: PrimitiveKind) -> u8 {
    match kind {
        PrimitiveKind::IntegerSmall => 16,
        PrimitiveKind::Integer | PrimitiveKind::Float => 32,
        PrimitiveKind::Long | PrimitiveKind::Double => 64,
        PrimitiveKind::Decimal => 128,
        _ => 0,
    }
}

/// Which of two numeric kinds can hold the other, and what is lost.
fn widen(a: PrimitiveKind, b: PrimitiveKind) -> (bool, Vec<TypeDiffKind>) {
    if a == PrimitiveKind::Number {
        return (true, Vec::new());
    }
    if b == PrimitiveKind::Number {
        return (false, Vec::new());
    }
    let mut diffs = Vec::new();
    if bits(a) != bits(b) {
        diffs.push(TypeDiffKind::Size);
    }
    if a.is_floating() || b.is_floating() {
        diffs.push(TypeDiffKind::Precision);
    }
    let a_wins = match (a.is_floating(), b.is_floating()) {
        (true, false) => true,
        (false, true) => false,
        _ => bits(a) >= bits(b),
    };
    (a_wins, diffs)
}

fn push_unique(diffs: &mut Vec<TypeDiffKind>, more: Vec<TypeDiffKind>) {
    for diff in more {
        if !diffs.contains(&diff) {
            diffs.push(diff);
        }
    }
}

impl<'m> TypeDiffer<'m> {
    pub fn new(model: &'m OmniModel, features: TargetFeatures) -> Self {
        Self {
            model,
            features,
            in_progress: RefCell::new(Vec::new()),
        }
    }

    pub fn model(&self) -> &'m OmniModel {
        self.model
    }

    /// The differences between `a` and `b`; `[FundamentalType]` if they
    /// have nothing in common.
    pub fn diff_type(&self, a: TypeId, b: TypeId) -> Vec<TypeDiffKind> {
        match self.common(a, b) {
            Some(common) => common.diffs,
            None => vec![TypeDiffKind::FundamentalType],
        }
    }

    /// The common type of `a` and `b`, or `None` if there is none.
    pub fn common(&self, a: TypeId, b: TypeId) -> Option<Common> {
        if a == b {
            return Some(Common::same(a));
        }
        let ua = self.model.unwrap_type(a);
        let ub = self.model.unwrap_type(b);

        let mut common = if ua == ub {
            Common::same(ua)
        } else {
            self.structural_common(ua, ub)
                .or_else(|| self.ancestor_common(ua, ub))?
        };
        if (ua != a) != (ub != b) {
            common.diffs.push(TypeDiffKind::Wrapped);
        }
        Some(common)
    }

    /// The common type of every entry of `types`, folded left to right.
    pub fn common_of(&self, types: &[TypeId]) -> Option<Common> {
        let (first, rest) = types.split_first()?;
        let mut acc = Common::same(*first);
        for ty in rest {
            let next = self.common_with(&acc.ty, *ty)?;
            acc.ty = next.ty;
            push_unique(&mut acc.diffs, next.diffs);
        }
        Some(acc)
    }

    /// Compare an already derived common type with one more type.
    pub fn common_with(&self, acc: &CommonType, b: TypeId) -> Option<Common> {
        match acc {
            CommonType::Existing(id) => self.common(*id, b),
            CommonType::Unknown => Some(Common {
                ty: CommonType::Unknown,
                diffs: Vec::new(),
            }),
            CommonType::Nullable(inner) => self
                .common_with(inner, b)
                .map(|c| c.map_ty(CommonType::nullable)),
            CommonType::Generalized(inner) => self
                .common_with(inner, b)
                .map(|c| c.map_ty(CommonType::generalized)),
            CommonType::Array(inner) => match self.model.get(self.model.unwrap_type(b)) {
                OmniType::Array { of } => self
                    .common_with(inner, *of)
                    .map(|c| c.map_ty(|ty| CommonType::Array(Box::new(ty)))),
                _ => None,
            },
            CommonType::Dictionary(key, value) => {
                match self.model.get(self.model.unwrap_type(b)) {
                    OmniType::Dictionary { key: kb, value: vb } => {
                        let key = self.common_with(key, *kb)?;
                        let value = self.common_with(value, *vb)?;
                        let mut diffs = key.diffs;
                        push_unique(&mut diffs, value.diffs);
                        Some(Common {
                            ty: CommonType::Dictionary(Box::new(key.ty), Box::new(value.ty)),
                            diffs,
                        })
                    }
                    _ => None,
                }
            }
            CommonType::GenericTarget {
                source,
                identifiers,
            } => match self.model.get(self.model.unwrap_type(b)) {
                OmniType::GenericTarget {
                    source: other,
                    target_identifiers,
                } if other == source && target_identifiers.len() == identifiers.len() => {
                    let mut merged = Vec::new();
                    let mut diffs = Vec::new();
                    for ((source_identifier, ty), target) in
                        identifiers.iter().zip(target_identifiers)
                    {
                        let OmniType::GenericTargetIdentifier { ty: bound, .. } =
                            self.model.get(*target)
                        else {
                            return None;
                        };
                        match self.common_with(ty, *bound) {
                            Some(c) => {
                                push_unique(&mut diffs, c.diffs);
                                merged.push((*source_identifier, c.ty));
                            }
                            None => {
                                push_unique(&mut diffs, vec![TypeDiffKind::NoGenericOverlap]);
                                merged.push((*source_identifier, CommonType::Unknown));
                            }
                        }
                    }
                    Some(Common {
                        ty: CommonType::GenericTarget {
                            source: *source,
                            identifiers: merged,
                        },
                        diffs,
                    })
                }
                _ => None,
            },
        }
    }

    /// The distinct type every other entry of `types` widens from, if any.
    pub fn narrowest(&self, types: &[TypeId]) -> Option<TypeId> {
        types.iter().copied().find(|candidate| {
            types.iter().all(|other| {
                other == candidate
                    || self
                        .common(*candidate, *other)
                        .is_some_and(|c| c.ty == CommonType::Existing(*other))
            })
        })
    }

    // ============================================================================
    // Per-kind rules
    // ============================================================================

    fn structural_common(&self, a: TypeId, b: TypeId) -> Option<Common> {
        match (self.model.get(a), self.model.get(b)) {
            (OmniType::Primitive(pa), OmniType::Primitive(pb)) => {
                self.primitive_common(a, pa, b, pb)
            }
            (OmniType::Array { of: x }, OmniType::Array { of: y }) => {
                let inner = self.common(*x, *y)?;
                Some(if inner.diffs.is_empty() {
                    Common::same(a)
                } else {
                    Common {
                        ty: CommonType::Array(Box::new(inner.ty)),
                        diffs: inner.diffs,
                    }
                })
            }
            (
                OmniType::Dictionary { key: ka, value: va },
                OmniType::Dictionary { key: kb, value: vb },
            ) => {
                let key = self.common(*ka, *kb)?;
                let value = self.common(*va, *vb)?;
                if key.diffs.is_empty() && value.diffs.is_empty() {
                    return Some(Common::same(a));
                }
                let mut diffs = key.diffs;
                diffs.extend(value.diffs);
                Some(Common {
                    ty: CommonType::Dictionary(Box::new(key.ty), Box::new(value.ty)),
                    diffs,
                })
            }
            (OmniType::Object(_), OmniType::Object(_)) => self.object_common(a, b),
            (OmniType::Enum(ea), OmniType::Enum(eb)) => {
                (ea.name == eb.name && ea.item_kind == eb.item_kind).then(|| Common::same(a))
            }
            (OmniType::Enum(e), OmniType::Primitive(p)) if self.enum_fits(e.item_kind, p) => {
                Some(Common {
                    ty: CommonType::Existing(b),
                    diffs: vec![TypeDiffKind::NarrowedType],
                })
            }
            (OmniType::Primitive(p), OmniType::Enum(e)) if self.enum_fits(e.item_kind, p) => {
                Some(Common {
                    ty: CommonType::Existing(a),
                    diffs: vec![TypeDiffKind::NarrowedType],
                })
            }
            (
                OmniType::GenericTarget {
                    source: sa,
                    target_identifiers: ia,
                },
                OmniType::GenericTarget {
                    source: sb,
                    target_identifiers: ib,
                },
            ) if sa == sb && ia.len() == ib.len() => self.common_with(
                &CommonType::GenericTarget {
                    source: *sa,
                    identifiers: self.bound_identifiers(ia)?,
                },
                b,
            )
            .map(|c| if c.diffs.is_empty() { Common::same(a) } else { c }),
            (OmniType::HardcodedReference { fqn: fa }, OmniType::HardcodedReference { fqn: fb }) => {
                (fa == fb).then(|| Common::same(a))
            }
            (OmniType::Unknown { .. }, OmniType::Unknown { .. }) => Some(Common::same(a)),
            (OmniType::Interface { of: x, .. }, OmniType::Interface { of: y, .. }) => {
                (x == y).then(|| Common::same(a))
            }
            _ => None,
        }
    }

    fn enum_fits(&self, item_kind: PrimitiveKind, p: &PrimitiveType) -> bool {
        p.kind == item_kind && p.literal.is_none()
    }

    fn bound_identifiers(&self, identifiers: &[TypeId]) -> Option<Vec<(TypeId, CommonType)>> {
        identifiers
            .iter()
            .map(|id| match self.model.get(*id) {
                OmniType::GenericTargetIdentifier {
                    source_identifier,
                    ty,
                } => Some((*source_identifier, CommonType::Existing(*ty))),
                _ => None,
            })
            .collect()
    }

    fn primitive_common(
        &self,
        a: TypeId,
        pa: &PrimitiveType,
        b: TypeId,
        pb: &PrimitiveType,
    ) -> Option<Common> {
        let mut diffs = Vec::new();
        let (base, base_prim) = if pa.kind == pb.kind {
            // Prefer the side without a literal, then the nullable side.
            let a_first = match (pa.literal.is_some(), pb.literal.is_some()) {
                (true, false) => false,
                (false, true) => true,
                _ => pa.nullable || !pb.nullable,
            };
            if a_first { (a, pa) } else { (b, pb) }
        } else if pa.kind.is_numeric() && pb.kind.is_numeric() {
            diffs.push(TypeDiffKind::IsomorphicType);
            let (a_wins, extra) = widen(pa.kind, pb.kind);
            diffs.extend(extra);
            if a_wins { (a, pa) } else { (b, pb) }
        } else if matches!(
            (pa.kind, pb.kind),
            (PrimitiveKind::Char, PrimitiveKind::String)
                | (PrimitiveKind::String, PrimitiveKind::Char)
        ) {
            diffs.push(TypeDiffKind::Size);
            if pa.kind == PrimitiveKind::String { (a, pa) } else { (b, pb) }
        } else {
            return None;
        };

        let mut ty = CommonType::Existing(base);
        match (&pa.literal, &pb.literal) {
            (Some(x), Some(y)) if x != y || pa.kind != pb.kind => {
                if self.features.literal_types() {
                    return None;
                }
                diffs.push(TypeDiffKind::NarrowedLiteralType);
                ty = ty.generalized();
            }
            (Some(_), None) | (None, Some(_)) => {
                diffs.push(TypeDiffKind::ConcreteVsAbstract);
                if base_prim.literal.is_some() {
                    ty = ty.generalized();
                }
            }
            _ => {}
        }
        if pa.nullable != pb.nullable {
            diffs.push(TypeDiffKind::Nullability);
            if !base_prim.nullable {
                ty = ty.nullable();
            }
        }
        Some(Common { ty, diffs })
    }

    fn object_common(&self, a: TypeId, b: TypeId) -> Option<Common> {
        let (oa, ob) = (self.model.get_object(a)?, self.model.get_object(b)?);
        if oa.properties.len() != ob.properties.len() || oa.extended_by != ob.extended_by {
            return None;
        }
        let key = if a < b { (a, b) } else { (b, a) };
        if self.in_progress.borrow().contains(&key) {
            return Some(Common::same(a));
        }
        self.in_progress.borrow_mut().push(key);
        let same_shape = oa.properties.iter().all(|pa| {
            ob.property(&pa.name).is_some_and(|pb| {
                let equality = self.diff_property(pa, pb);
                !matches_any_prop_diff(
                    &equality.property_diffs,
                    &[PropertyDiffKind::Name, PropertyDiffKind::Type],
                )
            })
        });
        self.in_progress.borrow_mut().retain(|pair| *pair != key);

        if !same_shape {
            return None;
        }
        let mut diffs = Vec::new();
        if oa.name != ob.name {
            diffs.push(TypeDiffKind::Name);
        }
        Some(Common {
            ty: CommonType::Existing(a),
            diffs,
        })
    }

    fn ancestor_common(&self, a: TypeId, b: TypeId) -> Option<Common> {
        self.climb(a, b).or_else(|| self.climb(b, a))
    }

    /// Look for `target` among the ancestors of `from`, one `IsSupertype`
    /// per level climbed.
    fn climb(&self, target: TypeId, from: TypeId) -> Option<Common> {
        let mut level = vec![from];
        let mut depth = 0;
        while !level.is_empty() && depth < self.model.len() {
            depth += 1;
            let mut next = Vec::new();
            for id in level {
                for parent in self.parents(id) {
                    if parent == target {
                        return Some(Common {
                            ty: CommonType::Existing(target),
                            diffs: vec![TypeDiffKind::IsSupertype; depth],
                        });
                    }
                    next.push(parent);
                }
            }
            level = next;
        }
        None
    }

    fn parents(&self, id: TypeId) -> Vec<TypeId> {
        let Some(ext) = self.model.get(id).extended_by() else {
            return Vec::new();
        };
        let ext = self.model.unwrap_type(ext);
        match self.model.get(ext) {
            OmniType::Composition(c) if c.kind == CompositionKind::And => c
                .types
                .iter()
                .map(|t| self.model.unwrap_type(*t))
                .collect(),
            _ => vec![ext],
        }
    }
}
