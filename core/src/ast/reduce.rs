use super::{AstBuilder, AstError, Node, NodeKind};
use crate::Vec;
use core::ptr;

/// Outcome of reducing one node: the node to keep (possibly the same
/// instance), or `None` to remove it from its parent.
pub type ReduceResult<'a> = Result<Option<&'a Node<'a>>, AstError>;

/// Copy-on-write rewrite of a tree.
///
/// Every `reduce_*` method defaults to [`AstReducer::super_reduce`]. A node
/// whose children all come back unchanged is returned as the same instance,
/// so an identity reducer hands back the exact input tree. A node with a
/// changed child is rebuilt with its original id.
pub trait AstReducer<'a> {
    fn builder(&self) -> &'a AstBuilder<'a>;

    fn reduce(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        match node.kind {
            NodeKind::Root { .. } => self.reduce_root(node),
            NodeKind::CompilationUnit { .. } => self.reduce_compilation_unit(node),
            NodeKind::ClassDeclaration { .. } => self.reduce_class_declaration(node),
            NodeKind::InterfaceDeclaration { .. } => self.reduce_interface_declaration(node),
            NodeKind::EnumDeclaration { .. } => self.reduce_enum_declaration(node),
            NodeKind::GenericParameter { .. } => self.reduce_generic_parameter(node),
            NodeKind::Field { .. } => self.reduce_field(node),
            NodeKind::MethodDeclaration { .. } => self.reduce_method_declaration(node),
            NodeKind::Parameter { .. } => self.reduce_parameter(node),
            NodeKind::Block { .. } => self.reduce_block(node),
            NodeKind::ReturnStatement { .. } => self.reduce_return_statement(node),
            NodeKind::Identifier { .. } => self.reduce_identifier(node),
            NodeKind::EdgeType { .. } => self.reduce_edge_type(node),
            NodeKind::GenericType { .. } => self.reduce_generic_type(node),
            NodeKind::FieldReference { .. } => self.reduce_field_reference(node),
        }
    }

    /// Reduce every child and rebuild `node` only if one of them changed.
    fn super_reduce(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        let mut children = Children {
            parent: node,
            changed: false,
        };
        let kind = match node.kind {
            NodeKind::Root { units } => NodeKind::Root {
                units: children.list(self, units)?,
            },
            NodeKind::CompilationUnit { name, declarations } => NodeKind::CompilationUnit {
                name,
                declarations: children.list(self, declarations)?,
            },
            NodeKind::ClassDeclaration {
                name,
                generics,
                extends,
                implements,
                body,
            } => NodeKind::ClassDeclaration {
                name: children.required(self, name, "name")?,
                generics: children.list(self, generics)?,
                extends: children.optional(self, extends)?,
                implements: children.list(self, implements)?,
                body: children.required(self, body, "body")?,
            },
            NodeKind::InterfaceDeclaration {
                name,
                generics,
                extends,
                body,
            } => NodeKind::InterfaceDeclaration {
                name: children.required(self, name, "name")?,
                generics: children.list(self, generics)?,
                extends: children.list(self, extends)?,
                body: children.required(self, body, "body")?,
            },
            NodeKind::EnumDeclaration { name, constants } => NodeKind::EnumDeclaration {
                name: children.required(self, name, "name")?,
                constants: children.list(self, constants)?,
            },
            NodeKind::GenericParameter { name, upper_bound } => NodeKind::GenericParameter {
                name: children.required(self, name, "name")?,
                upper_bound: children.optional(self, upper_bound)?,
            },
            NodeKind::Field { name, ty } => NodeKind::Field {
                name: children.required(self, name, "name")?,
                ty: children.required(self, ty, "type")?,
            },
            NodeKind::MethodDeclaration {
                name,
                return_type,
                parameters,
                body,
            } => NodeKind::MethodDeclaration {
                name: children.required(self, name, "name")?,
                return_type: children.required(self, return_type, "return type")?,
                parameters: children.list(self, parameters)?,
                body: children.optional(self, body)?,
            },
            NodeKind::Parameter { name, ty } => NodeKind::Parameter {
                name: children.required(self, name, "name")?,
                ty: children.required(self, ty, "type")?,
            },
            NodeKind::Block { statements } => NodeKind::Block {
                statements: children.list(self, statements)?,
            },
            NodeKind::ReturnStatement { expression } => NodeKind::ReturnStatement {
                expression: children.optional(self, expression)?,
            },
            NodeKind::GenericType { base, arguments } => NodeKind::GenericType {
                base: children.required(self, base, "base")?,
                arguments: children.list(self, arguments)?,
            },
            // Leaves. A reference only holds an id, so there is nothing to descend into.
            NodeKind::Identifier { .. }
            | NodeKind::EdgeType { .. }
            | NodeKind::FieldReference { .. } => return Ok(Some(node)),
        };

        if children.changed {
            Ok(Some(self.builder().rebuild(node, kind)))
        } else {
            Ok(Some(node))
        }
    }

    fn reduce_root(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_compilation_unit(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_class_declaration(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_interface_declaration(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_enum_declaration(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_generic_parameter(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_field(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_method_declaration(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_parameter(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_block(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_return_statement(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_identifier(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_edge_type(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_generic_type(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }

    fn reduce_field_reference(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        self.super_reduce(node)
    }
}

/// Tracks whether any child of `parent` came back as a different node.
struct Children<'a> {
    parent: &'a Node<'a>,
    changed: bool,
}

impl<'a> Children<'a> {
    fn required<R: AstReducer<'a> + ?Sized>(
        &mut self,
        reducer: &mut R,
        child: &'a Node<'a>,
        field: &'static str,
    ) -> Result<&'a Node<'a>, AstError> {
        match reducer.reduce(child)? {
            Some(reduced) => {
                self.changed |= !ptr::eq(reduced, child);
                Ok(reduced)
            }
            None => Err(AstError::RequiredChildRemoved {
                parent: self.parent.id,
                field,
            }),
        }
    }

    fn optional<R: AstReducer<'a> + ?Sized>(
        &mut self,
        reducer: &mut R,
        child: Option<&'a Node<'a>>,
    ) -> Result<Option<&'a Node<'a>>, AstError> {
        let Some(child) = child else {
            return Ok(None);
        };
        let reduced = reducer.reduce(child)?;
        self.changed |= !reduced.is_some_and(|r| ptr::eq(r, child));
        Ok(reduced)
    }

    fn list<R: AstReducer<'a> + ?Sized>(
        &mut self,
        reducer: &mut R,
        children: &'a [&'a Node<'a>],
    ) -> Result<&'a [&'a Node<'a>], AstError> {
        let mut reduced = Vec::with_capacity(children.len());
        let mut changed = false;
        for &child in children {
            match reducer.reduce(child)? {
                Some(node) => {
                    changed |= !ptr::eq(node, child);
                    reduced.push(node);
                }
                None => changed = true,
            }
        }
        if !changed {
            return Ok(children);
        }
        self.changed = true;
        Ok(reducer.builder().nodes(&reduced))
    }
}

/// Reducer that gives every node of a subtree a fresh id.
struct FreshIds<'a> {
    builder: &'a AstBuilder<'a>,
}

impl<'a> AstReducer<'a> for FreshIds<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        let reduced = self.super_reduce(node)?;
        Ok(reduced.map(|n| self.builder.alloc(n.kind)))
    }
}

/// Deep copy of `node` whose nodes all carry new ids.
///
/// Use it to place an equivalent subtree somewhere else in a tree without
/// sharing identities with the original.
pub fn fresh_copy<'a>(
    builder: &'a AstBuilder<'a>,
    node: &'a Node<'a>,
) -> Result<&'a Node<'a>, AstError> {
    FreshIds { builder }
        .reduce(node)?
        .ok_or(AstError::RootRemoved)
}

#[cfg(test)]
#[path = "reduce_test.rs"]
mod reduce_test;
