//! Errors raised while transforming a model or its syntax tree.
//!
//! None of these are recovered inside the crate: they propagate to whoever
//! orchestrates the build, which decides whether to abort or skip a target.

use crate::String;
use crate::ast::NodeId;
use omnigen_types::ModelError;
use thiserror::Error;

/// Failure of a syntax-tree operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AstError {
    /// A `Reference` points at an id that is not in the current tree.
    ///
    /// Usually means a transformation desynchronized node ids.
    #[error("no node with id {0} in the current tree")]
    ReferenceNodeNotFound(NodeId),

    #[error("'{field}' of node {parent} is required but was removed")]
    RequiredChildRemoved { parent: NodeId, field: &'static str },

    #[error("the root node was removed")]
    RootRemoved,
}

/// Failure of a model or tree transformer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Ast(#[from] AstError),

    /// A pass met a type it cannot handle.
    #[error("{pass}: cannot handle {ty}: {reason}")]
    Precondition {
        pass: &'static str,
        ty: String,
        reason: String,
    },
}

impl TransformError {
    pub(crate) fn precondition(
        pass: &'static str,
        ty: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TransformError::Precondition {
            pass,
            ty: ty.into(),
            reason: reason.into(),
        }
    }
}
