use super::{Node, NodeKind};
use crate::Vec;

/// What a visitor produced for one node and everything below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitResult<T> {
    None,
    Single(T),
    Many(Vec<VisitResult<T>>),
}

impl<T> VisitResult<T> {
    /// Drop empty results and collapse single-element lists, recursively.
    ///
    /// # Example
    ///
    /// ```
    /// use omnigen_core::ast::VisitResult;
    ///
    /// let nested = VisitResult::Many(vec![
    ///     VisitResult::None,
    ///     VisitResult::Many(vec![VisitResult::Single(1), VisitResult::None]),
    /// ]);
    /// assert_eq!(nested.flatten(), VisitResult::Single(1));
    /// ```
    pub fn flatten(self) -> VisitResult<T> {
        match self {
            VisitResult::Many(items) => {
                let mut kept: Vec<VisitResult<T>> = items
                    .into_iter()
                    .map(VisitResult::flatten)
                    .filter(|r| !matches!(r, VisitResult::None))
                    .collect();
                match kept.len() {
                    0 => VisitResult::None,
                    1 => kept.pop().unwrap_or(VisitResult::None),
                    _ => VisitResult::Many(kept),
                }
            }
            other => other,
        }
    }

    /// The only value left after flattening, if exactly one remains.
    pub fn flatten_to_single(self) -> Option<T> {
        match self.flatten() {
            VisitResult::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Every value, depth-first.
    pub fn into_vec(self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<T>) {
        match self {
            VisitResult::None => {}
            VisitResult::Single(value) => out.push(value),
            VisitResult::Many(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
        }
    }
}

/// Depth-first, pre-order traversal of a tree.
///
/// Every `visit_*` method defaults to [`AstVisitor::super_visit`], which
/// visits the children and collects their results. Override the kinds you
/// care about; call `super_visit` from the override to keep descending.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use omnigen_core::ast::{AstBuilder, AstVisitor, Node, VisitResult};
///
/// struct Names;
///
/// impl<'a> AstVisitor<'a> for Names {
///     type Output = &'a str;
///
///     fn visit_identifier(&mut self, node: &'a Node<'a>) -> VisitResult<&'a str> {
///         node.name().map_or(VisitResult::None, VisitResult::Single)
///     }
/// }
///
/// let arena = Bump::new();
/// let builder = AstBuilder::new(&arena);
/// let ty = builder.identifier("int");
/// let field = builder.field("count", ty);
///
/// assert_eq!(Names.visit(field).into_vec(), vec!["count", "int"]);
/// ```
pub trait AstVisitor<'a> {
    type Output;

    fn visit(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        match node.kind {
            NodeKind::Root { .. } => self.visit_root(node),
            NodeKind::CompilationUnit { .. } => self.visit_compilation_unit(node),
            NodeKind::ClassDeclaration { .. } => self.visit_class_declaration(node),
            NodeKind::InterfaceDeclaration { .. } => self.visit_interface_declaration(node),
            NodeKind::EnumDeclaration { .. } => self.visit_enum_declaration(node),
            NodeKind::GenericParameter { .. } => self.visit_generic_parameter(node),
            NodeKind::Field { .. } => self.visit_field(node),
            NodeKind::MethodDeclaration { .. } => self.visit_method_declaration(node),
            NodeKind::Parameter { .. } => self.visit_parameter(node),
            NodeKind::Block { .. } => self.visit_block(node),
            NodeKind::ReturnStatement { .. } => self.visit_return_statement(node),
            NodeKind::Identifier { .. } => self.visit_identifier(node),
            NodeKind::EdgeType { .. } => self.visit_edge_type(node),
            NodeKind::GenericType { .. } => self.visit_generic_type(node),
            NodeKind::FieldReference { .. } => self.visit_field_reference(node),
        }
    }

    fn super_visit(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        let children = node.children();
        if children.is_empty() {
            return VisitResult::None;
        }
        VisitResult::Many(children.into_iter().map(|child| self.visit(child)).collect())
    }

    fn visit_root(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_compilation_unit(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_class_declaration(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_interface_declaration(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_enum_declaration(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_generic_parameter(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_field(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_method_declaration(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_parameter(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_block(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_return_statement(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_identifier(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_edge_type(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    fn visit_generic_type(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }

    /// References are leaves; the referenced node is not visited from here.
    fn visit_field_reference(&mut self, node: &'a Node<'a>) -> VisitResult<Self::Output> {
        self.super_visit(node)
    }
}
