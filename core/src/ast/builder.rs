use super::{Node, NodeId, NodeKind, Reference};
use bumpalo::Bump;
use core::cell::Cell;
use omnigen_types::TypeId;

/// Allocates nodes of one tree family and hands out their ids.
///
/// Every node built through the same builder gets a distinct id, so ids
/// stay unique across all generations produced by reducing one tree.
#[derive(Debug)]
pub struct AstBuilder<'a> {
    arena: &'a Bump,
    next_id: Cell<u64>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(arena: &'a Bump) -> &'a Self {
        arena.alloc(Self {
            arena,
            next_id: Cell::new(0),
        })
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    pub fn fresh_id(&self) -> NodeId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeId(id)
    }

    /// A new node with a fresh id.
    pub fn alloc(&self, kind: NodeKind<'a>) -> &'a Node<'a> {
        let id = self.fresh_id();
        self.alloc_with_id(id, kind)
    }

    /// A new node that adopts an existing identity.
    pub fn alloc_with_id(&self, id: NodeId, kind: NodeKind<'a>) -> &'a Node<'a> {
        self.arena.alloc(Node { id, kind })
    }

    /// A replacement for `from` that keeps its id.
    pub fn rebuild(&self, from: &Node<'a>, kind: NodeKind<'a>) -> &'a Node<'a> {
        self.alloc_with_id(from.id, kind)
    }

    pub fn str(&self, s: &str) -> &'a str {
        self.arena.alloc_str(s)
    }

    pub fn nodes(&self, nodes: &[&'a Node<'a>]) -> &'a [&'a Node<'a>] {
        self.arena.alloc_slice_copy(nodes)
    }

    // ============================================================================
    // Shorthands
    // ============================================================================

    pub fn identifier(&self, value: &str) -> &'a Node<'a> {
        let value = self.str(value);
        self.alloc(NodeKind::Identifier { value })
    }

    pub fn edge_type(&self, ty: TypeId) -> &'a Node<'a> {
        self.alloc(NodeKind::EdgeType { ty })
    }

    pub fn field(&self, name: &str, ty: &'a Node<'a>) -> &'a Node<'a> {
        let name = self.identifier(name);
        self.alloc(NodeKind::Field { name, ty })
    }

    pub fn block(&self, statements: &[&'a Node<'a>]) -> &'a Node<'a> {
        let statements = self.nodes(statements);
        self.alloc(NodeKind::Block { statements })
    }

    pub fn field_reference(&self, target: &Node<'a>) -> &'a Node<'a> {
        self.alloc(NodeKind::FieldReference {
            target: Reference {
                target_id: target.id,
            },
        })
    }
}
