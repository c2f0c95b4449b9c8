use super::*;
use crate::ast::{AstBuilder, ReduceResult};
use bumpalo::Bump;
use omnigen_types::{OmniModel, PrimitiveKind};
use pretty_assertions::assert_eq;

struct RenameField<'a> {
    builder: &'a AstBuilder<'a>,
    from: &'static str,
    to: &'static str,
}

impl<'a> AstReducer<'a> for RenameField<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce_field(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        match node.kind {
            NodeKind::Field { ty, .. } if node.name() == Some(self.from) => {
                let name = self.builder.identifier(self.to);
                Ok(Some(self.builder.rebuild(node, NodeKind::Field { name, ty })))
            }
            _ => self.super_reduce(node),
        }
    }

    fn reduce_compilation_unit(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        // A rewrite that fails part way through the tree.
        if node.name() == Some("Broken") {
            return Err(AstError::RequiredChildRemoved {
                parent: node.id,
                field: "declarations",
            });
        }
        self.super_reduce(node)
    }
}

struct Remove<'a> {
    builder: &'a AstBuilder<'a>,
    name: &'static str,
}

impl<'a> AstReducer<'a> for Remove<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce_field(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        if node.name() == Some(self.name) {
            return Ok(None);
        }
        self.super_reduce(node)
    }
}

/// A single unit holding `class Pet { name; getName() { return name } }`.
/// Returns the root and the `name` field.
fn sample<'a>(b: &'a AstBuilder<'a>, unit_name: &str) -> (RootAstNode<'a>, &'a Node<'a>) {
    let mut model = OmniModel::new("sample");
    let string = model.primitive(PrimitiveKind::String);

    let field = b.field("name", b.edge_type(string));
    let ret = b.alloc(NodeKind::ReturnStatement {
        expression: Some(b.field_reference(field)),
    });
    let getter = b.alloc(NodeKind::MethodDeclaration {
        name: b.identifier("getName"),
        return_type: b.edge_type(string),
        parameters: &[],
        body: Some(b.block(&[ret])),
    });
    let class = b.alloc(NodeKind::ClassDeclaration {
        name: b.identifier("Pet"),
        generics: &[],
        extends: None,
        implements: &[],
        body: b.block(&[field, getter]),
    });
    let unit = b.alloc(NodeKind::CompilationUnit {
        name: b.str(unit_name),
        declarations: b.nodes(&[class]),
    });
    let root = b.alloc(NodeKind::Root {
        units: b.nodes(&[unit]),
    });
    (RootAstNode::new(b, root), field)
}

#[test]
fn references_resolve_across_reduce() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let (mut root, field) = sample(b, "Pet");
    let reference = Reference {
        target_id: field.id,
    };

    let before = root.resolve_node_ref(reference).unwrap();
    assert!(core::ptr::eq(before, field));

    let mut rename = RenameField {
        builder: b,
        from: "name",
        to: "title",
    };
    root.reduce(&mut rename).unwrap();

    let after = root.resolve_node_ref(reference).unwrap();
    assert_eq!(after.id, field.id);
    assert_eq!(after.name(), Some("title"));
    assert!(!core::ptr::eq(after, field));
    root.verify_references().unwrap();
}

#[test]
fn deleted_targets_are_reported() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let (mut root, field) = sample(b, "Pet");

    root.reduce(&mut Remove {
        builder: b,
        name: "name",
    })
    .unwrap();

    assert_eq!(
        root.verify_references(),
        Err(AstError::ReferenceNodeNotFound(field.id))
    );
}

#[test]
fn failed_reduce_keeps_the_previous_generation() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let (mut root, _) = sample(b, "Broken");
    let published = root.node();

    let mut rename = RenameField {
        builder: b,
        from: "name",
        to: "title",
    };
    assert!(root.reduce(&mut rename).is_err());
    assert!(core::ptr::eq(root.node(), published));
}

#[test]
fn unchanged_reduce_keeps_the_index() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let (mut root, field) = sample(b, "Pet");
    let published = root.node();

    let mut rename = RenameField {
        builder: b,
        from: "missing",
        to: "other",
    };
    let reduced = root.reduce(&mut rename).unwrap();
    assert!(core::ptr::eq(reduced, published));
    assert_eq!(root.units().len(), 1);
    assert!(core::ptr::eq(
        root.resolve_node_ref(Reference {
            target_id: field.id
        })
        .unwrap(),
        field
    ));
}
