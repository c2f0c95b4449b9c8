use core::fmt;

/// One way in which two types differ.
///
/// Variants are declared from most to least severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeDiffKind {
    /// No common type exists.
    FundamentalType,
    /// Different representations of the same domain, e.g. two numeric kinds.
    IsomorphicType,
    /// Two different literal values of the same kind.
    NarrowedLiteralType,
    /// A literal against the same kind without a literal.
    ConcreteVsAbstract,
    /// Generic arguments with nothing in common.
    NoGenericOverlap,
    /// One side is a restricted form of the other, e.g. an enum of strings.
    NarrowedType,
    Size,
    Precision,
    /// One side is an ancestor of the other. Repeated once per level.
    IsSupertype,
    Name,
    /// One side is wrapped in a decorating or external reference.
    Wrapped,
    Nullability,
}

impl TypeDiffKind {
    /// How much this difference weighs when picking between candidates.
    pub fn amount(self) -> u8 {
        match self {
            TypeDiffKind::FundamentalType => 10,
            TypeDiffKind::IsomorphicType => 9,
            TypeDiffKind::NarrowedLiteralType | TypeDiffKind::ConcreteVsAbstract => 8,
            TypeDiffKind::NoGenericOverlap => 7,
            TypeDiffKind::NarrowedType => 6,
            TypeDiffKind::Size => 5,
            TypeDiffKind::Precision => 4,
            TypeDiffKind::IsSupertype
            | TypeDiffKind::Name
            | TypeDiffKind::Wrapped
            | TypeDiffKind::Nullability => 0,
        }
    }

    /// Differences that only concern literal narrowing.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TypeDiffKind::NarrowedLiteralType | TypeDiffKind::ConcreteVsAbstract
        )
    }
}

/// One way in which two properties differ.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyDiffKind {
    Name,
    FieldName,
    Type,
    /// Anything that changes how the property is declared.
    Signature,
    Required,
    /// Documentation only.
    Meta,
}

impl PropertyDiffKind {
    pub fn score(self) -> u8 {
        match self {
            PropertyDiffKind::Name => 10,
            PropertyDiffKind::FieldName => 9,
            PropertyDiffKind::Type => 8,
            PropertyDiffKind::Signature => 7,
            PropertyDiffKind::Required => 6,
            PropertyDiffKind::Meta => 5,
        }
    }
}

/// Is `needle` present in `haystack`, directly or implied by a stronger diff?
pub fn matches_type_diff(haystack: &[TypeDiffKind], needle: TypeDiffKind) -> bool {
    haystack.iter().any(|diff| {
        *diff == needle
            || match needle {
                TypeDiffKind::NarrowedLiteralType => matches!(
                    diff,
                    TypeDiffKind::FundamentalType | TypeDiffKind::IsomorphicType
                ),
                TypeDiffKind::ConcreteVsAbstract => matches!(
                    diff,
                    TypeDiffKind::NarrowedLiteralType
                        | TypeDiffKind::FundamentalType
                        | TypeDiffKind::IsomorphicType
                ),
                TypeDiffKind::NarrowedType => *diff == TypeDiffKind::ConcreteVsAbstract,
                _ => false,
            }
    })
}

pub fn matches_any_type_diff(haystack: &[TypeDiffKind], needles: &[TypeDiffKind]) -> bool {
    needles.iter().any(|n| matches_type_diff(haystack, *n))
}

/// Is `needle` present in `haystack`, directly or implied by a stronger diff?
pub fn matches_prop_diff(haystack: &[PropertyDiffKind], needle: PropertyDiffKind) -> bool {
    haystack.iter().any(|diff| {
        *diff == needle
            || (needle == PropertyDiffKind::Signature
                && matches!(diff, PropertyDiffKind::Name | PropertyDiffKind::Type))
    })
}

pub fn matches_any_prop_diff(haystack: &[PropertyDiffKind], needles: &[PropertyDiffKind]) -> bool {
    needles.iter().any(|n| matches_prop_diff(haystack, *n))
}

/// How equal two things are, ascending.
///
/// A threshold is met when the computed level is at least the threshold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EqualityLevel {
    NotEqualMin,
    IsomorphicMin,
    /// Interchangeable through their common type.
    #[default]
    FunctionMin,
    /// Identical apart from nullability.
    CloneMin,
    Identical,
}

const FUNCTION_TYPE_DIFFS: &[TypeDiffKind] = &[
    TypeDiffKind::Nullability,
    TypeDiffKind::Name,
    TypeDiffKind::Wrapped,
    TypeDiffKind::IsSupertype,
    TypeDiffKind::Size,
    TypeDiffKind::Precision,
    TypeDiffKind::NarrowedType,
    TypeDiffKind::ConcreteVsAbstract,
];

const FUNCTION_PROPERTY_DIFFS: &[PropertyDiffKind] = &[
    PropertyDiffKind::Type,
    PropertyDiffKind::Meta,
    PropertyDiffKind::FieldName,
    PropertyDiffKind::Required,
];

impl EqualityLevel {
    pub fn of(type_diffs: &[TypeDiffKind], property_diffs: &[PropertyDiffKind]) -> Self {
        if type_diffs.is_empty() && property_diffs.is_empty() {
            return EqualityLevel::Identical;
        }
        if type_diffs.iter().all(|d| *d == TypeDiffKind::Nullability)
            && property_diffs.iter().all(|d| *d == PropertyDiffKind::Type)
        {
            return EqualityLevel::CloneMin;
        }
        if type_diffs.iter().all(|d| FUNCTION_TYPE_DIFFS.contains(d))
            && property_diffs
                .iter()
                .all(|d| FUNCTION_PROPERTY_DIFFS.contains(d))
        {
            return EqualityLevel::FunctionMin;
        }
        if !type_diffs.contains(&TypeDiffKind::FundamentalType)
            && !property_diffs
                .iter()
                .any(|d| matches!(d, PropertyDiffKind::Name | PropertyDiffKind::Signature))
        {
            return EqualityLevel::IsomorphicMin;
        }
        EqualityLevel::NotEqualMin
    }

    pub fn meets(self, threshold: EqualityLevel) -> bool {
        self >= threshold
    }
}

impl fmt::Display for EqualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EqualityLevel::NotEqualMin => "not-equal",
            EqualityLevel::IsomorphicMin => "isomorphic",
            EqualityLevel::FunctionMin => "function",
            EqualityLevel::CloneMin => "clone",
            EqualityLevel::Identical => "identical",
        })
    }
}
