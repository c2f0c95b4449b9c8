//! From a transformed model to a syntax tree, and rewrites of that tree.
//!
//! The [`Interpreter`] declares every reachable object, interface, enum and
//! generic source of a model. [`AstTransformer`]s then rewrite the result
//! copy-on-write through [`RootAstNode::reduce`], in registration order.

mod accessors;
mod interpreter;
mod reorder;

pub use accessors::AddAccessorsAstTransformer;
pub use interpreter::Interpreter;
pub use reorder::ReorderMembersAstTransformer;

use crate::api::BuildOptions;
use crate::ast::RootAstNode;
use crate::errors::TransformError;
use crate::transform::pascal_case;
use crate::{String, format};
use omnigen_types::{OmniModel, TargetFeatures};

/// The tree of another model built alongside this one.
pub struct ExternalSyntaxTree<'x, 'a> {
    pub model_name: &'x str,
    pub root: &'x RootAstNode<'a>,
}

/// What a tree transformer gets to work with.
pub struct AstTransformerArguments<'x, 'a> {
    pub model: &'x OmniModel,
    pub root: &'x mut RootAstNode<'a>,
    pub externals: &'x [ExternalSyntaxTree<'x, 'a>],
    pub options: &'x BuildOptions,
    pub features: TargetFeatures,
}

pub trait AstTransformer {
    fn name(&self) -> &'static str;

    fn transform_ast<'a>(
        &self,
        args: &mut AstTransformerArguments<'_, 'a>,
    ) -> Result<(), TransformError>;
}

/// `getFirstName` for a field named `first_name`.
pub(crate) fn getter_name(field: &str) -> String {
    format!("get{}", pascal_case(field))
}
