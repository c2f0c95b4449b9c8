//! Model-integrity errors.

use crate::TypeId;
use alloc::string::String;
use thiserror::Error;

/// A structural defect in an [`OmniModel`](crate::OmniModel).
///
/// These are fatal: a model that fails validation is never handed to a
/// transformer pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("type {id} is not part of the model")]
    DanglingType { id: TypeId },

    #[error("type {id} was retired but is still referenced by {referrer}")]
    RetiredType { id: TypeId, referrer: String },

    #[error("cyclic extension chain through '{name}'")]
    CyclicExtension { name: String },

    #[error("type {id} cannot be extended by {parent}")]
    NotInheritable { id: TypeId, parent: TypeId },

    #[error("generic target {target} binds {found} identifiers but its source declares {expected}")]
    GenericArityMismatch {
        target: String,
        expected: usize,
        found: usize,
    },

    #[error("interface {id} is an interface of another interface")]
    InterfaceOfInterface { id: TypeId },

    #[error("negation {id} may only appear as a later operand of an AND composition")]
    MisplacedNegation { id: TypeId },

    #[error("type {id} ({description}) is not reachable from the model")]
    Orphaned { id: TypeId, description: String },

    #[error("type {id} is not an object")]
    NotAnObject { id: TypeId },
}
