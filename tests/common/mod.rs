//! One-line outlines of generated declarations, for readable assertions.

use omnigen::omnigen_core::ast::{Node, NodeKind};
use omnigen::{OmniModel, RootAstNode};

pub fn outline(model: &OmniModel, root: &RootAstNode<'_>) -> Vec<String> {
    root.units()
        .iter()
        .flat_map(|unit| unit.children())
        .map(|declaration| declaration_line(model, declaration))
        .collect()
}

fn declaration_line(model: &OmniModel, node: &Node<'_>) -> String {
    match node.kind {
        NodeKind::ClassDeclaration {
            name,
            generics,
            extends,
            implements,
            body,
        } => {
            let mut line = format!("class {}{}", text(name), parameters(model, generics));
            if let Some(parent) = extends {
                line.push_str(&format!(" extends {}", ty(model, parent)));
            }
            if !implements.is_empty() {
                line.push_str(&format!(" implements {}", list(model, implements)));
            }
            format!("{line} {}", members(model, body))
        }
        NodeKind::InterfaceDeclaration {
            name,
            extends,
            body,
            ..
        } => {
            let mut line = format!("interface {}", text(name));
            if !extends.is_empty() {
                line.push_str(&format!(" extends {}", list(model, extends)));
            }
            format!("{line} {}", members(model, body))
        }
        NodeKind::EnumDeclaration { name, constants } => {
            let constants: Vec<_> = constants.iter().map(|c| text(c)).collect();
            format!("enum {} {{ {} }}", text(name), constants.join(", "))
        }
        _ => format!("{node:?}"),
    }
}

fn members(model: &OmniModel, body: &Node<'_>) -> String {
    let members: Vec<String> = body
        .children()
        .iter()
        .map(|member| match member.kind {
            NodeKind::Field { name, ty: field_type } => {
                format!("{}: {}", text(name), ty(model, field_type))
            }
            NodeKind::MethodDeclaration {
                name, return_type, ..
            } => format!("{}(): {}", text(name), ty(model, return_type)),
            _ => format!("{member:?}"),
        })
        .collect();
    if members.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", members.join("; "))
    }
}

fn parameters(model: &OmniModel, generics: &[&Node<'_>]) -> String {
    if generics.is_empty() {
        return String::new();
    }
    let parameters: Vec<String> = generics
        .iter()
        .map(|p| match p.kind {
            NodeKind::GenericParameter {
                name,
                upper_bound: Some(upper),
            } => format!("{} extends {}", text(name), ty(model, upper)),
            _ => text(p).to_string(),
        })
        .collect();
    format!("<{}>", parameters.join(", "))
}

fn list(model: &OmniModel, types: &[&Node<'_>]) -> String {
    types.iter().map(|t| ty(model, t)).collect::<Vec<_>>().join(", ")
}

fn ty(model: &OmniModel, node: &Node<'_>) -> String {
    match node.kind {
        NodeKind::EdgeType { ty } => match model.get(ty).name() {
            Some(name) => name.to_string(),
            None => model.describe(ty),
        },
        NodeKind::GenericType { base, arguments } => {
            format!("{}<{}>", ty(model, base), list(model, arguments))
        }
        _ => format!("{node:?}"),
    }
}

fn text<'a>(node: &Node<'a>) -> &'a str {
    node.name().unwrap_or("?")
}
