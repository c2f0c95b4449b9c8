use core::fmt;
use omnigen_types::TypeId;

/// Identity of a node, kept across rebuilds unless explicitly replaced.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A pointer to another node by id, resolved through
/// [`RootAstNode::resolve_node_ref`](super::RootAstNode::resolve_node_ref).
///
/// Never traversed into: it holds no subtree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    pub target_id: NodeId,
}

#[derive(Debug, PartialEq)]
pub struct Node<'a> {
    pub id: NodeId,
    pub kind: NodeKind<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind<'a> {
    Root {
        units: &'a [&'a Node<'a>],
    },
    CompilationUnit {
        name: &'a str,
        declarations: &'a [&'a Node<'a>],
    },
    ClassDeclaration {
        name: &'a Node<'a>,
        generics: &'a [&'a Node<'a>],
        extends: Option<&'a Node<'a>>,
        implements: &'a [&'a Node<'a>],
        body: &'a Node<'a>,
    },
    InterfaceDeclaration {
        name: &'a Node<'a>,
        generics: &'a [&'a Node<'a>],
        extends: &'a [&'a Node<'a>],
        body: &'a Node<'a>,
    },
    EnumDeclaration {
        name: &'a Node<'a>,
        constants: &'a [&'a Node<'a>],
    },
    GenericParameter {
        name: &'a Node<'a>,
        upper_bound: Option<&'a Node<'a>>,
    },
    Field {
        name: &'a Node<'a>,
        ty: &'a Node<'a>,
    },
    MethodDeclaration {
        name: &'a Node<'a>,
        return_type: &'a Node<'a>,
        parameters: &'a [&'a Node<'a>],
        // None for a signature without a body.
        body: Option<&'a Node<'a>>,
    },
    Parameter {
        name: &'a Node<'a>,
        ty: &'a Node<'a>,
    },
    Block {
        statements: &'a [&'a Node<'a>],
    },
    ReturnStatement {
        expression: Option<&'a Node<'a>>,
    },
    Identifier {
        value: &'a str,
    },
    /// A type of the model, rendered by the target.
    EdgeType {
        ty: TypeId,
    },
    GenericType {
        base: &'a Node<'a>,
        arguments: &'a [&'a Node<'a>],
    },
    FieldReference {
        target: Reference,
    },
}

impl<'a> Node<'a> {
    /// Direct children in declaration order.
    pub fn children(&self) -> crate::Vec<&'a Node<'a>> {
        let mut out = crate::Vec::new();
        let mut one = |node: &'a Node<'a>| out.push(node);
        match self.kind {
            NodeKind::Root { units } => units.iter().copied().for_each(&mut one),
            NodeKind::CompilationUnit { declarations, .. } => {
                declarations.iter().copied().for_each(&mut one)
            }
            NodeKind::ClassDeclaration {
                name,
                generics,
                extends,
                implements,
                body,
            } => {
                one(name);
                generics.iter().copied().for_each(&mut one);
                extends.into_iter().for_each(&mut one);
                implements.iter().copied().for_each(&mut one);
                one(body);
            }
            NodeKind::InterfaceDeclaration {
                name,
                generics,
                extends,
                body,
            } => {
                one(name);
                generics.iter().copied().for_each(&mut one);
                extends.iter().copied().for_each(&mut one);
                one(body);
            }
            NodeKind::EnumDeclaration { name, constants } => {
                one(name);
                constants.iter().copied().for_each(&mut one);
            }
            NodeKind::GenericParameter { name, upper_bound } => {
                one(name);
                upper_bound.into_iter().for_each(&mut one);
            }
            NodeKind::Field { name, ty } | NodeKind::Parameter { name, ty } => {
                one(name);
                one(ty);
            }
            NodeKind::MethodDeclaration {
                name,
                return_type,
                parameters,
                body,
            } => {
                one(name);
                one(return_type);
                parameters.iter().copied().for_each(&mut one);
                body.into_iter().for_each(&mut one);
            }
            NodeKind::Block { statements } => statements.iter().copied().for_each(&mut one),
            NodeKind::ReturnStatement { expression } => expression.into_iter().for_each(&mut one),
            NodeKind::GenericType { base, arguments } => {
                one(base);
                arguments.iter().copied().for_each(&mut one);
            }
            NodeKind::Identifier { .. }
            | NodeKind::EdgeType { .. }
            | NodeKind::FieldReference { .. } => {}
        }
        out
    }

    /// The text of an identifier node, or of a declaration's name.
    pub fn name(&self) -> Option<&'a str> {
        match self.kind {
            NodeKind::Identifier { value } => Some(value),
            NodeKind::CompilationUnit { name, .. } => Some(name),
            NodeKind::ClassDeclaration { name, .. }
            | NodeKind::InterfaceDeclaration { name, .. }
            | NodeKind::EnumDeclaration { name, .. }
            | NodeKind::GenericParameter { name, .. }
            | NodeKind::Field { name, .. }
            | NodeKind::MethodDeclaration { name, .. }
            | NodeKind::Parameter { name, .. } => name.name(),
            _ => None,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, NodeKind::Field { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, NodeKind::MethodDeclaration { .. })
    }
}
