//! Intermediate representation of the generic type model.
//!
//! ## Structure
//!
//! - **Core types**: `OmniType`, `TypeId`, `OmniProperty` - the logical structure of types
//! - **Model**: `OmniModel` - the arena owning every type, plus the export registry
//! - **Generic algorithms**: visitor and edge-rewriting patterns over the type graph
//! - **Integrity**: structural validation of a whole model
//! - **Display**: short labels for diagnostics

pub mod composition;
pub mod display;
pub mod fold;
pub mod integrity;
pub mod kind;
pub mod model;
pub mod ty;
pub mod visit;

pub use display::TypeFormatter;
pub use fold::{SwapFolder, TypeFolder};
pub use kind::{CompositionKind, LiteralValue, PrimitiveKind, SchemaType, UnknownKind};
pub use model::{
    OmniContinuation, OmniContinuationMapping, OmniEndpoint, OmniInput, OmniModel, OmniOutput,
    OmniServer,
};
pub use ty::{
    CompositionType, EnumMember, EnumType, ObjectType, OmniProperty, OmniType, OmniTypeKind,
    PrimitiveType, TypeId,
};
pub use visit::{ReachableTypes, TypeVisitor};
