use super::{CompositionKind, LiteralValue, PrimitiveKind, UnknownKind};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Handle to a type stored in an [`OmniModel`](crate::OmniModel) arena.
///
/// Ids are stable for the lifetime of the model: rewrites never renumber
/// existing types, they only add new ones or retire slots nothing reaches.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Logical structure of a type in the generic model.
///
/// All edges to other types are [`TypeId`]s resolved through the owning
/// model, so cyclic graphs (a property typed by its own owner, a supertype
/// mentioning its subtypes) need no special ownership handling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum OmniType {
    Primitive(PrimitiveType),
    Object(ObjectType),
    /// Signature-only projection of `of`.
    Interface {
        of: TypeId,
        name: Option<String>,
        extended_by: Option<TypeId>,
    },
    Composition(CompositionType),
    /// A parameterizable declaration of `of`.
    GenericSource {
        of: TypeId,
        source_identifiers: Vec<TypeId>,
    },
    GenericSourceIdentifier {
        placeholder_name: String,
        lower_bound: Option<TypeId>,
        upper_bound: Option<TypeId>,
    },
    /// A concrete binding of `source`'s identifiers.
    GenericTarget {
        source: TypeId,
        target_identifiers: Vec<TypeId>,
    },
    GenericTargetIdentifier {
        source_identifier: TypeId,
        ty: TypeId,
    },
    Unknown {
        unknown_kind: UnknownKind,
        upper_bound: Option<TypeId>,
    },
    Dictionary {
        key: TypeId,
        value: TypeId,
    },
    Array {
        of: TypeId,
    },
    Enum(EnumType),
    HardcodedReference {
        fqn: String,
    },
    /// A type declared by another model; `of` is the local stand-in.
    ExternalModelReference {
        model_name: String,
        name: String,
        of: TypeId,
    },
    /// Wraps `of` with extra documentation without changing its shape.
    Decorating {
        of: TypeId,
        description: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveType {
    pub kind: PrimitiveKind,
    pub literal: Option<LiteralValue>,
    pub nullable: bool,
}

impl PrimitiveType {
    pub fn new(kind: PrimitiveKind) -> Self {
        Self {
            kind,
            literal: None,
            nullable: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectType {
    pub name: String,
    pub properties: Vec<OmniProperty>,
    pub extended_by: Option<TypeId>,
    pub description: Option<String>,
}

impl ObjectType {
    pub fn property(&self, name: &str) -> Option<&OmniProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CompositionType {
    pub kind: CompositionKind,
    pub types: Vec<TypeId>,
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub name: String,
    pub item_kind: PrimitiveKind,
    pub members: Vec<EnumMember>,
    pub extended_by: Option<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumMember {
    pub name: String,
    pub value: LiteralValue,
}

/// A property of an object.
///
/// `owner` is a traversal-only back link to the object that stores the
/// property; it never keeps anything alive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OmniProperty {
    pub name: String,
    /// Name of the backing field when it differs from the serialized name.
    pub field_name: Option<String>,
    pub ty: TypeId,
    pub owner: TypeId,
    pub required: bool,
    pub read_only: bool,
    pub deprecated: bool,
    pub is_abstract: bool,
    pub description: Option<String>,
}

impl OmniProperty {
    pub fn new(name: impl Into<String>, ty: TypeId, owner: TypeId) -> Self {
        Self {
            name: name.into(),
            field_name: None,
            ty,
            owner,
            required: false,
            read_only: false,
            deprecated: false,
            is_abstract: false,
            description: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Variant discriminant, used in diagnostics and quick kind checks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OmniTypeKind {
    Primitive,
    Object,
    Interface,
    Composition,
    GenericSource,
    GenericSourceIdentifier,
    GenericTarget,
    GenericTargetIdentifier,
    Unknown,
    Dictionary,
    Array,
    Enum,
    HardcodedReference,
    ExternalModelReference,
    Decorating,
}

impl OmniType {
    pub fn kind(&self) -> OmniTypeKind {
        match self {
            OmniType::Primitive(_) => OmniTypeKind::Primitive,
            OmniType::Object(_) => OmniTypeKind::Object,
            OmniType::Interface { .. } => OmniTypeKind::Interface,
            OmniType::Composition(_) => OmniTypeKind::Composition,
            OmniType::GenericSource { .. } => OmniTypeKind::GenericSource,
            OmniType::GenericSourceIdentifier { .. } => OmniTypeKind::GenericSourceIdentifier,
            OmniType::GenericTarget { .. } => OmniTypeKind::GenericTarget,
            OmniType::GenericTargetIdentifier { .. } => OmniTypeKind::GenericTargetIdentifier,
            OmniType::Unknown { .. } => OmniTypeKind::Unknown,
            OmniType::Dictionary { .. } => OmniTypeKind::Dictionary,
            OmniType::Array { .. } => OmniTypeKind::Array,
            OmniType::Enum(_) => OmniTypeKind::Enum,
            OmniType::HardcodedReference { .. } => OmniTypeKind::HardcodedReference,
            OmniType::ExternalModelReference { .. } => OmniTypeKind::ExternalModelReference,
            OmniType::Decorating { .. } => OmniTypeKind::Decorating,
        }
    }

    /// The declared name, for kinds that have one.
    pub fn name(&self) -> Option<&str> {
        match self {
            OmniType::Object(o) => Some(&o.name),
            OmniType::Enum(e) => Some(&e.name),
            OmniType::Interface { name, .. } => name.as_deref(),
            OmniType::Composition(c) => c.name.as_deref(),
            OmniType::ExternalModelReference { name, .. } => Some(name),
            OmniType::GenericSourceIdentifier {
                placeholder_name, ..
            } => Some(placeholder_name),
            OmniType::HardcodedReference { fqn } => Some(fqn),
            _ => None,
        }
    }

    /// The single-parent extension slot, for kinds that have one.
    pub fn extended_by(&self) -> Option<TypeId> {
        match self {
            OmniType::Object(o) => o.extended_by,
            OmniType::Enum(e) => e.extended_by,
            OmniType::Interface { extended_by, .. } => *extended_by,
            _ => None,
        }
    }

    pub fn extended_by_mut(&mut self) -> Option<&mut Option<TypeId>> {
        match self {
            OmniType::Object(o) => Some(&mut o.extended_by),
            OmniType::Enum(e) => Some(&mut e.extended_by),
            OmniType::Interface { extended_by, .. } => Some(extended_by),
            _ => None,
        }
    }

    pub fn properties(&self) -> &[OmniProperty] {
        match self {
            OmniType::Object(o) => &o.properties,
            _ => &[],
        }
    }

    pub fn as_primitive(&self) -> Option<&PrimitiveType> {
        match self {
            OmniType::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            OmniType::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut ObjectType> {
        match self {
            OmniType::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_composition(&self) -> Option<&CompositionType> {
        match self {
            OmniType::Composition(c) => Some(c),
            _ => None,
        }
    }

    /// Kinds allowed in an `extended_by` slot.
    pub fn is_inheritable(&self) -> bool {
        matches!(
            self.kind(),
            OmniTypeKind::Object
                | OmniTypeKind::Interface
                | OmniTypeKind::Composition
                | OmniTypeKind::GenericTarget
                | OmniTypeKind::Enum
        )
    }

    /// Kinds that only wrap another type.
    pub fn wrapped(&self) -> Option<TypeId> {
        match self {
            OmniType::Decorating { of, .. } | OmniType::ExternalModelReference { of, .. } => {
                Some(*of)
            }
            _ => None,
        }
    }

    /// Every outgoing edge, in a fixed order.
    pub fn children(&self) -> Vec<TypeId> {
        let mut out = Vec::new();
        self.for_each_edge(|id| out.push(id));
        out
    }

    pub fn for_each_edge(&self, mut f: impl FnMut(TypeId)) {
        match self {
            OmniType::Primitive(_) | OmniType::HardcodedReference { .. } => {}
            OmniType::Object(o) => {
                for p in &o.properties {
                    f(p.ty);
                }
                if let Some(ext) = o.extended_by {
                    f(ext);
                }
            }
            OmniType::Interface {
                of, extended_by, ..
            } => {
                f(*of);
                if let Some(ext) = extended_by {
                    f(*ext);
                }
            }
            OmniType::Composition(c) => c.types.iter().copied().for_each(f),
            OmniType::GenericSource {
                of,
                source_identifiers,
            } => {
                f(*of);
                source_identifiers.iter().copied().for_each(f);
            }
            OmniType::GenericSourceIdentifier {
                lower_bound,
                upper_bound,
                ..
            } => {
                lower_bound.iter().chain(upper_bound.iter()).copied().for_each(f);
            }
            OmniType::GenericTarget {
                source,
                target_identifiers,
            } => {
                f(*source);
                target_identifiers.iter().copied().for_each(f);
            }
            OmniType::GenericTargetIdentifier {
                source_identifier,
                ty,
            } => {
                f(*source_identifier);
                f(*ty);
            }
            OmniType::Unknown { upper_bound, .. } => upper_bound.iter().copied().for_each(f),
            OmniType::Dictionary { key, value } => {
                f(*key);
                f(*value);
            }
            OmniType::Array { of } => f(*of),
            OmniType::Enum(e) => e.extended_by.iter().copied().for_each(f),
            OmniType::ExternalModelReference { of, .. } | OmniType::Decorating { of, .. } => {
                f(*of)
            }
        }
    }
}
