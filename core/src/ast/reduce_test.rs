use super::*;
use crate::ast::{AstBuilder, AstVisitor, NodeId, VisitResult};
use bumpalo::Bump;
use omnigen_types::{OmniModel, PrimitiveKind};
use pretty_assertions::assert_eq;

struct Identity<'a> {
    builder: &'a AstBuilder<'a>,
}

impl<'a> AstReducer<'a> for Identity<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }
}

struct Rename<'a> {
    builder: &'a AstBuilder<'a>,
    from: &'static str,
    to: &'static str,
}

impl<'a> AstReducer<'a> for Rename<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce_identifier(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
        match node.kind {
            NodeKind::Identifier { value } if value == self.from => {
                let value = self.builder.str(self.to);
                Ok(Some(self.builder.rebuild(node, NodeKind::Identifier { value })))
            }
            _ => Ok(Some(node)),
        }
    }
}

struct DropFields<'a> {
    builder: &'a AstBuilder<'a>,
    name: &'static str,
}

impl<'a> AstReducer<'a> for DropFields<'a> {
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

struct DropIdentifiers<'a> {
    builder: &'a AstBuilder<'a>,
}

impl<'a> AstReducer<'a> for DropIdentifiers<'a> {
    fn builder(&self) -> &'a AstBuilder<'a> {
        self.builder
    }

    fn reduce_identifier(&mut self, _node: &'a Node<'a>) -> ReduceResult<'a> {
        Ok(None)
    }
}

struct Ids;

impl<'a> AstVisitor<'a> for Ids {
    type Output = NodeId;

    fn visit(&mut self, node: &'a Node<'a>) -> VisitResult<NodeId> {
        VisitResult::Many(vec![VisitResult::Single(node.id), self.super_visit(node)])
    }
}

/// class Pet { name: string; age: int; getName(): string { return name } }
fn sample<'a>(b: &'a AstBuilder<'a>) -> &'a Node<'a> {
    let mut model = OmniModel::new("sample");
    let string = model.primitive(PrimitiveKind::String);
    let int = model.primitive(PrimitiveKind::Integer);

    let name_field = b.field("name", b.edge_type(string));
    let age_field = b.field("age", b.edge_type(int));
    let ret = b.alloc(NodeKind::ReturnStatement {
        expression: Some(b.field_reference(name_field)),
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
        body: b.block(&[name_field, age_field, getter]),
    });
    let unit = b.alloc(NodeKind::CompilationUnit {
        name: b.str("Pet"),
        declarations: b.nodes(&[class]),
    });
    b.alloc(NodeKind::Root {
        units: b.nodes(&[unit]),
    })
}

fn class<'a>(root: &'a Node<'a>) -> &'a Node<'a> {
    let NodeKind::Root { units } = root.kind else {
        panic!("expected a root");
    };
    let NodeKind::CompilationUnit { declarations, .. } = units[0].kind else {
        panic!("expected a compilation unit");
    };
    declarations[0]
}

fn class_body<'a>(root: &'a Node<'a>) -> &'a [&'a Node<'a>] {
    let NodeKind::ClassDeclaration { body, .. } = class(root).kind else {
        panic!("expected a class");
    };
    let NodeKind::Block { statements } = body.kind else {
        panic!("expected a block");
    };
    statements
}

#[test]
fn identity_reducer_returns_the_same_instance() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let root = sample(b);

    let reduced = Identity { builder: b }.reduce(root).unwrap().unwrap();
    assert!(core::ptr::eq(reduced, root));
}

#[test]
fn rebuilds_only_the_changed_path() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let root = sample(b);
    let before = class_body(root);

    let mut rename = Rename {
        builder: b,
        from: "age",
        to: "years",
    };
    let reduced = rename.reduce(root).unwrap().unwrap();
    let after = class_body(reduced);

    assert!(!core::ptr::eq(reduced, root));
    assert_eq!(reduced.id, root.id);
    assert!(core::ptr::eq(after[0], before[0]));
    assert!(core::ptr::eq(after[2], before[2]));
    assert!(!core::ptr::eq(after[1], before[1]));
    assert_eq!(after[1].id, before[1].id);
    assert_eq!(after[1].name(), Some("years"));

    let ids_before = Ids.visit(root).into_vec();
    let ids_after = Ids.visit(reduced).into_vec();
    assert_eq!(ids_before, ids_after);
}

#[test]
fn removed_list_entries_are_dropped() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let root = sample(b);

    let mut drop = DropFields {
        builder: b,
        name: "name",
    };
    let reduced = drop.reduce(root).unwrap().unwrap();
    let names: Vec<_> = class_body(reduced).iter().map(|n| n.name()).collect();
    assert_eq!(names, vec![Some("age"), Some("getName")]);
}

#[test]
fn removing_a_required_child_fails() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let root = sample(b);

    let err = DropIdentifiers { builder: b }.reduce(root).unwrap_err();
    assert_eq!(
        err,
        AstError::RequiredChildRemoved {
            parent: class(root).id,
            field: "name",
        }
    );
}

#[test]
fn fresh_copy_renumbers_every_node() {
    let arena = Bump::new();
    let b = AstBuilder::new(&arena);
    let root = sample(b);

    let copy = fresh_copy(b, root).unwrap();
    let original_ids = Ids.visit(root).into_vec();
    let copied_ids = Ids.visit(copy).into_vec();

    assert_eq!(original_ids.len(), copied_ids.len());
    assert!(copied_ids.iter().all(|id| !original_ids.contains(id)));
    assert_eq!(class_body(copy)[1].name(), Some("age"));
}
