//! Language-neutral code tree shared by every target.
//!
//! Nodes live in a [`bumpalo::Bump`] arena and are never mutated. A
//! rewrite goes through an [`AstReducer`], which rebuilds only the path from
//! a changed node up to the root and hands back the very same instances for
//! every untouched subtree. [`RootAstNode`] publishes one generation of the
//! tree at a time and resolves [`Reference`]s against it.

mod builder;
mod node;
mod reduce;
mod root;
mod visit;

pub use builder::AstBuilder;
pub use node::{Node, NodeId, NodeKind, Reference};
pub use reduce::{AstReducer, ReduceResult, fresh_copy};
pub use root::RootAstNode;
pub use visit::{AstVisitor, VisitResult};

pub use crate::errors::AstError;
