use super::{AstTransformer, AstTransformerArguments, getter_name};
use crate::Vec;
use crate::ast::{AstBuilder, AstError, AstReducer, Node, NodeKind, ReduceResult, fresh_copy};
use crate::errors::TransformError;
use alloc::collections::BTreeSet;
use tracing::debug;

/// Adds a getter for every field of every class.
///
/// The getter returns a reference to its field and a fresh copy of the
/// field's type, so the two never share nodes. Classes that already declare
/// a method with the getter's name keep theirs.
pub struct AddAccessorsAstTransformer;

impl AstTransformer for AddAccessorsAstTransformer {
    fn name(&self) -> &'static str {
        "add-accessors"
    }

    fn transform_ast<'a>(
        &self,
        args: &mut AstTransformerArguments<'_, 'a>,
    ) -> Result<(), TransformError> {
        if !args.options.target.generate_accessors {
            return Ok(());
        }
        let mut reducer = AddAccessors {
            builder: args.root.builder(),
            added: 0,
        };
        args.root.reduce(&mut reducer)?;
        debug!(added = reducer.added, "generated accessors");
        Ok(())
    }
}

struct AddAccessors<'a> {
    builder: &'a AstBuilder<'a>,
    added: usize,
}

impl<'a> AddAccessors<'a> {
    fn getter(&self, field: &'a Node<'a>) -> Result<Option<&'a Node<'a>>, AstError> {
        let NodeKind::Field { name, ty } = field.kind else {
            return Ok(None);
        };
        let Some(name) = name.name() else {
            return Ok(None);
        };
        let b = self.builder;
        let ret = b.alloc(NodeKind::ReturnStatement {
            expression: Some(b.field_reference(field)),
        });
        Ok(Some(b.alloc(NodeKind::MethodDeclaration {
            name: b.identifier(&getter_name(name)),
            return_type: fresh_copy(b, ty)?,
            parameters: &[],
            body: Some(b.block(&[ret])),
        })))
    }
}

impl<'a> AstReducer<'a> for AddAccessors<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce_class_declaration(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        let Some(class) = self.super_reduce(node)? else {
            return Ok(None);
        };
        let NodeKind::ClassDeclaration {
            name,
            generics,
            extends,
            implements,
            body,
        } = class.kind
        else {
            return Ok(Some(class));
        };
        let NodeKind::Block { statements } = body.kind else {
            return Ok(Some(class));
        };

        let existing: BTreeSet<&str> = statements
            .iter()
            .filter(|s| s.is_method())
            .filter_map(|s| s.name())
            .collect();
        let mut members: Vec<&'a Node<'a>> = statements.to_vec();
        for field in statements.iter().filter(|s| s.is_field()) {
            let wanted = field.name().map(getter_name);
            if wanted.is_some_and(|w| existing.contains(w.as_str())) {
                continue;
            }
            if let Some(getter) = self.getter(field)? {
                members.push(getter);
            }
        }
        if members.len() == statements.len() {
            return Ok(Some(class));
        }
        self.added += members.len() - statements.len();

        let b = self.builder;
        let body = b.rebuild(body, NodeKind::Block {
            statements: b.nodes(&members),
        });
        Ok(Some(b.rebuild(class, NodeKind::ClassDeclaration {
            name,
            generics,
            extends,
            implements,
            body,
        })))
    }
}

#[cfg(test)]
#[path = "accessors_test.rs"]
mod accessors_test;
