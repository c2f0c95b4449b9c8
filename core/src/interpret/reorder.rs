use super::{AstTransformer, AstTransformerArguments};
use crate::Vec;
use crate::ast::{AstBuilder, AstReducer, Node, NodeKind, ReduceResult};
use crate::errors::TransformError;

/// Orders class members as fields first, then methods.
///
/// The sort is stable and moves nodes without rebuilding them, so member
/// ids and any reference to a member survive.
pub struct ReorderMembersAstTransformer;

impl AstTransformer for ReorderMembersAstTransformer {
    fn name(&self) -> &'static str {
        "reorder-members"
    }

    fn transform_ast<'a>(
        &self,
        args: &mut AstTransformerArguments<'_, 'a>,
    ) -> Result<(), TransformError> {
        if !args.options.target.reorder_members {
            return Ok(());
        }
        let mut reducer = ReorderMembers {
            builder: args.root.builder(),
        };
        args.root.reduce(&mut reducer)?;
        Ok(())
    }
}

struct ReorderMembers<'a> {
    builder: &'a AstBuilder<'a>,
}

fn rank(member: &Node<'_>) -> u8 {
    match member.kind {
        NodeKind::Field { .. } => 0,
        NodeKind::MethodDeclaration { .. } => 1,
        _ => 2,
    }
}

impl<'a> AstReducer<'a> for ReorderMembers<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce_class_declaration(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        let NodeKind::ClassDeclaration {
            name,
            generics,
            extends,
            implements,
            body,
        } = node.kind
        else {
            return self.super_reduce(node);
        };
        let NodeKind::Block { statements } = body.kind else {
            return Ok(Some(node));
        };
        if statements.is_sorted_by_key(|s| rank(s)) {
            return Ok(Some(node));
        }

        let mut members: Vec<&'a Node<'a>> = statements.to_vec();
        members.sort_by_key(|m| rank(m));
        let b = self.builder;
        let body = b.rebuild(body, NodeKind::Block {
            statements: b.nodes(&members),
        });
        Ok(Some(b.rebuild(node, NodeKind::ClassDeclaration {
            name,
            generics,
            extends,
            implements,
            body,
        })))
    }
}

#[cfg(test)]
#[path = "reorder_test.rs"]
mod reorder_test;
