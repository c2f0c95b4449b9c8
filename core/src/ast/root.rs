use super::{
    AstBuilder, AstError, AstReducer, AstVisitor, Node, NodeId, NodeKind, Reference, VisitResult,
};
use bumpalo::Bump;
use core::cell::RefCell;
use core::ptr;
use hashbrown::{DefaultHashBuilder, HashMap};
use tracing::trace;

type NodeIndex<'a> = HashMap<NodeId, &'a Node<'a>, DefaultHashBuilder, &'a Bump>;

/// The published generation of a tree, plus the id index used to resolve
/// [`Reference`]s against it.
///
/// The index is built on first use and thrown away whenever a reduce
/// publishes a new generation.
pub struct RootAstNode<'a> {
    builder: &'a AstBuilder<'a>,
    current: &'a Node<'a>,
    index: RefCell<Option<NodeIndex<'a>>>,
}

impl<'a> RootAstNode<'a> {
    pub fn new(builder: &'a AstBuilder<'a>, root: &'a Node<'a>) -> Self {
        Self {
            builder,
            current: root,
            index: RefCell::new(None),
        }
    }

    pub fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    pub fn node(&self) -> &'a Node<'a> {
        self.current
    }

    /// Compilation units of the current generation.
    pub fn units(&self) -> &'a [&'a Node<'a>] {
        match self.current.kind {
            NodeKind::Root { units } => units,
            _ => &[],
        }
    }

    pub fn visit<V: AstVisitor<'a> + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        visitor.visit(self.current)
    }

    /// Run `reducer` over the tree and publish the result.
    ///
    /// On error nothing is published: the previous generation stays current.
    pub fn reduce<R: AstReducer<'a> + ?Sized>(
        &mut self,
        reducer: &mut R,
    ) -> Result<&'a Node<'a>, AstError> {
        let reduced = reducer.reduce(self.current)?.ok_or(AstError::RootRemoved)?;
        if !ptr::eq(reduced, self.current) {
            trace!(root = %reduced.id, "publishing reduced tree");
            self.current = reduced;
            self.index.get_mut().take();
        }
        Ok(reduced)
    }

    /// The node of the current generation that `reference` points at.
    pub fn resolve_node_ref(&self, reference: Reference) -> Result<&'a Node<'a>, AstError> {
        let mut index = self.index.borrow_mut();
        let index = index.get_or_insert_with(|| self.build_index());
        index
            .get(&reference.target_id)
            .copied()
            .ok_or(AstError::ReferenceNodeNotFound(reference.target_id))
    }

    /// Check that every reference in the current generation resolves.
    pub fn verify_references(&self) -> Result<(), AstError> {
        let references = self.visit(&mut CollectReferences).into_vec();
        for reference in references {
            self.resolve_node_ref(reference)?;
        }
        Ok(())
    }

    fn build_index(&self) -> NodeIndex<'a> {
        let mut collector = IndexNodes {
            index: HashMap::new_in(self.builder.arena()),
        };
        collector.visit(self.current);
        collector.index
    }
}

struct IndexNodes<'a> {
    index: NodeIndex<'a>,
}

impl<'a> AstVisitor<'a> for IndexNodes<'a> {
    type Output = ();

    fn visit(&mut self, node: &'a Node<'a>) -> VisitResult<()> {
        self.index.insert(node.id, node);
        self.super_visit(node)
    }
}

struct CollectReferences;

impl<'a> AstVisitor<'a> for CollectReferences {
    type Output = Reference;

    fn visit_field_reference(&mut self, node: &'a Node<'a>) -> VisitResult<Reference> {
        match node.kind {
            NodeKind::FieldReference { target } => VisitResult::Single(target),
            _ => VisitResult::None,
        }
    }
}

impl core::fmt::Debug for RootAstNode<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RootAstNode")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "root_test.rs"]
mod root_test;
