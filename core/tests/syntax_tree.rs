//! The syntax-tree core through its public API: build a small tree, walk it,
//! rewrite it copy-on-write and resolve references across generations.

use bumpalo::Bump;
use core::ptr;
use omnigen_core::ast::{
    AstBuilder, AstError, AstReducer, AstVisitor, Node, NodeKind, ReduceResult, RootAstNode,
    VisitResult,
};
use omnigen_types::{OmniModel, PrimitiveKind, TypeId};
use pretty_assertions::assert_eq;

/// Two units: `class Pet { name; getName() -> name }` and `class Owner { pet }`.
fn two_classes<'a>(b: &'a AstBuilder<'a>, string: TypeId) -> RootAstNode<'a> {
    let name = b.field("name", b.edge_type(string));
    let ret = b.alloc(NodeKind::ReturnStatement {
        expression: Some(b.field_reference(name)),
    });
    let get_name = b.alloc(NodeKind::MethodDeclaration {
        name: b.identifier("getName"),
        return_type: b.edge_type(string),
        parameters: &[],
        body: Some(b.block(&[ret])),
    });
    let pet = class(b, "Pet", &[name, get_name]);
    let owner_pet = b.field("pet", b.edge_type(string));
    let owner = class(b, "Owner", &[owner_pet]);
    let root = b.alloc(NodeKind::Root {
        units: b.nodes(&[pet, owner]),
    });
    RootAstNode::new(b, root)
}

fn class<'a>(b: &'a AstBuilder<'a>, name: &str, members: &[&'a Node<'a>]) -> &'a Node<'a> {
    let declaration = b.alloc(NodeKind::ClassDeclaration {
        name: b.identifier(name),
        generics: &[],
        extends: None,
        implements: &[],
        body: b.block(members),
    });
    b.alloc(NodeKind::CompilationUnit {
        name: b.str(name),
        declarations: b.nodes(&[declaration]),
    })
}

struct FieldNames;

impl<'a> AstVisitor<'a> for FieldNames {
    type Output = &'a str;

    fn visit_field(&mut self, node: &'a Node<'a>) -> VisitResult<&'a str> {
        node.name().map_or(VisitResult::None, VisitResult::Single)
    }
}

/// Renames the field called `from`, keeping its id.
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
                Ok(Some(self.builder.rebuild(node, NodeKind::Field {
                    name: self.builder.identifier(self.to),
                    ty,
                })))
            }
            _ => Ok(Some(node)),
        }
    }
}

#[test]
fn visitor_collects_every_field() {
    let mut model = OmniModel::new("pets");
    let string = model.primitive(PrimitiveKind::String);
    let arena = Bump::new();
    let root = two_classes(AstBuilder::new(&arena), string);

    let names = root.visit(&mut FieldNames).into_vec();

    assert_eq!(names, vec!["name", "pet"]);
}

#[test]
fn rewrite_touches_only_the_changed_path() {
    let mut model = OmniModel::new("pets");
    let string = model.primitive(PrimitiveKind::String);
    let arena = Bump::new();
    let builder = AstBuilder::new(&arena);
    let mut root = two_classes(builder, string);
    let before = root.units();

    let mut rename = RenameField {
        builder,
        from: "name",
        to: "title",
    };
    root.reduce(&mut rename).unwrap();

    let after = root.units();
    assert!(!ptr::eq(after[0], before[0]));
    assert_eq!(after[0].id, before[0].id);
    assert!(ptr::eq(after[1], before[1]));
    assert_eq!(root.visit(&mut FieldNames).into_vec(), vec!["title", "pet"]);
}

#[test]
fn references_follow_the_renamed_field() {
    let mut model = OmniModel::new("pets");
    let string = model.primitive(PrimitiveKind::String);
    let arena = Bump::new();
    let builder = AstBuilder::new(&arena);
    let mut root = two_classes(builder, string);
    root.verify_references().unwrap();

    let mut rename = RenameField {
        builder,
        from: "name",
        to: "title",
    };
    root.reduce(&mut rename).unwrap();

    struct References;
    impl<'a> AstVisitor<'a> for References {
        type Output = &'a Node<'a>;
        fn visit_field_reference(&mut self, node: &'a Node<'a>) -> VisitResult<&'a Node<'a>> {
            VisitResult::Single(node)
        }
    }
    let reference = root.visit(&mut References).flatten_to_single().unwrap();
    let NodeKind::FieldReference { target } = reference.kind else {
        panic!("expected a field reference");
    };
    assert_eq!(root.resolve_node_ref(target).unwrap().name(), Some("title"));
}

#[test]
fn removing_a_referenced_field_is_detected() {
    let mut model = OmniModel::new("pets");
    let string = model.primitive(PrimitiveKind::String);
    let arena = Bump::new();
    let builder = AstBuilder::new(&arena);
    let mut root = two_classes(builder, string);

    struct DropName<'a>(&'a AstBuilder<'a>);
    impl<'a> AstReducer<'a> for DropName<'a> {
        fn builder(&self) -> &'a AstBuilder<'a> {
            self.0
        }
        fn reduce_field(&mut self, node: &'a Node<'a>) -> ReduceResult<'a> {
            Ok((node.name() != Some("name")).then_some(node))
        }
    }
    root.reduce(&mut DropName(builder)).unwrap();

    assert!(matches!(
        root.verify_references(),
        Err(AstError::ReferenceNodeNotFound(_))
    ));
}
