//! The generic type model and its equality engine.
//!
//! Schemas of every dialect are parsed into an [`OmniModel`]: an arena of
//! [`OmniType`]s addressed by [`TypeId`], with objects, compositions,
//! generics and a handful of escape-hatch kinds. This crate holds that
//! algebra, the traversal and rewriting helpers built over it, the
//! integrity rules every model must satisfy, and the [`TypeDiffer`] that
//! grades how different two types or properties are.
//!
//! # Example
//!
//! ```
//! use omnigen_types::{OmniModel, PrimitiveKind, TargetFeatures, TypeDiffKind, TypeDiffer};
//!
//! let mut model = OmniModel::new("example");
//! let int = model.primitive(PrimitiveKind::Integer);
//! let double = model.primitive(PrimitiveKind::Double);
//!
//! let differ = TypeDiffer::new(&model, TargetFeatures::GENERIC);
//! let common = differ.common(int, double).unwrap();
//! assert_eq!(common.ty.existing(), Some(double));
//! assert!(common.diffs.contains(&TypeDiffKind::IsomorphicType));
//! ```

#![no_std]
extern crate alloc;

pub mod equality;
pub mod error;
pub mod features;
pub mod ir;

pub use equality::{
    Common, CommonProperty, CommonType, EqualityLevel, PropertyDiffKind, PropertyEquality,
    TypeDiffKind, TypeDiffer, matches_any_prop_diff, matches_any_type_diff, matches_prop_diff,
    matches_type_diff,
};
pub use error::ModelError;
pub use features::{FeatureFlags, StaticInnerTypes, TargetFeatures};
pub use ir::{
    CompositionKind, CompositionType, EnumMember, EnumType, LiteralValue, ObjectType,
    OmniContinuation, OmniContinuationMapping, OmniEndpoint, OmniInput, OmniModel, OmniOutput,
    OmniProperty, OmniServer, OmniType, OmniTypeKind, PrimitiveKind, PrimitiveType,
    ReachableTypes, SchemaType, SwapFolder, TypeFolder, TypeFormatter, TypeId, TypeVisitor,
    UnknownKind,
};
